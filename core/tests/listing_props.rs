//! Properties of the listing controller over generated rosters.

use placement_core::{paginate, ListState, Student, StudentFilter};
use proptest::prelude::*;

fn student(id: u64, name: String, cgpa: Option<f64>, placed: bool) -> Student {
    Student {
        id,
        email: format!("{}@example.com", name.to_lowercase()),
        name,
        phone: None,
        cgpa,
        skills: vec!["Python".to_string()],
        internships: Vec::new(),
        projects: Vec::new(),
        placed,
        created: "2024-01-01T00:00:00".to_string(),
    }
}

fn roster() -> impl Strategy<Value = Vec<Student>> {
    prop::collection::vec(
        ("[a-d]{1,6}", prop::option::of(5.0f64..10.0), any::<bool>()),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, cgpa, placed))| student(i as u64 + 1, name, cgpa, placed))
            .collect()
    })
}

fn filter() -> impl Strategy<Value = StudentFilter> {
    prop_oneof![
        Just(StudentFilter::All),
        Just(StudentFilter::Placed),
        Just(StudentFilter::Available),
        Just(StudentFilter::TopPerformers),
    ]
}

proptest! {
    #[test]
    fn page_is_contiguous_slice_of_filtered(
        students in roster(),
        search in "[a-d]{0,2}",
        filter in filter(),
        page_size in 1usize..8,
        steps in 0usize..10,
    ) {
        let mut state = ListState::new(search, filter);
        let total_pages = paginate(&students, &state, page_size).total_pages;
        for _ in 0..steps {
            state = state.next_page(total_pages);
        }

        let all = paginate(&students, &state.clone().go_to_page(1, 1), usize::MAX);
        let view = paginate(&students, &state, page_size);

        let start = (view.page - 1) * page_size;
        let expected: Vec<u64> = all.items.iter().skip(start).take(page_size).map(|s| s.id).collect();
        let actual: Vec<u64> = view.items.iter().map(|s| s.id).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(view.total_pages, view.filtered_count.div_ceil(page_size));
        prop_assert!(view.page >= 1);
        prop_assert!(view.total_pages == 0 || view.page <= view.total_pages);
        prop_assert!(view.items.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn search_or_filter_change_returns_to_first_page(
        search in "[a-d]{0,2}",
        filter in filter(),
        target in 2usize..20,
    ) {
        let state = ListState::<StudentFilter>::default().go_to_page(target, 20);
        prop_assert_eq!(state.page(), target);
        prop_assert_eq!(state.clone().with_search(search).page(), 1);
        prop_assert_eq!(state.with_filter(filter).page(), 1);
    }

    #[test]
    fn top_performers_never_include_missing_cgpa(students in roster()) {
        let state = ListState::new("", StudentFilter::TopPerformers);
        let view = paginate(&students, &state, usize::MAX);
        prop_assert!(view.items.iter().all(|s| s.cgpa.is_some_and(|c| c >= 8.5)));
    }
}
