//! Plain-text rendering of dashboard pages.
//!
//! Each page is written through a `fmt::Write` helper so formatting errors
//! propagate with `?` instead of being dropped.

use std::fmt::{self, Write};

use placement_core::{AdminOverview, PageView, Placement, Stats, Student};

/// Run a writer over a fresh `String`.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write(&mut out)?;
    Ok(out)
}

pub fn students_page(view: &PageView<'_, Student>) -> Result<String, fmt::Error> {
    render(|out| write_students_page(out, view))
}

pub fn student_profile(student: &Student, placements: &[Placement]) -> Result<String, fmt::Error> {
    render(|out| {
        write_student_profile(out, student)?;
        write_placements(out, placements)
    })
}

pub fn placements_table(placements: &[Placement]) -> Result<String, fmt::Error> {
    render(|out| write_placements(out, placements))
}

pub fn stats(stats: &Stats) -> Result<String, fmt::Error> {
    render(|out| write_stats(out, stats))
}

pub fn admin(overview: &AdminOverview) -> Result<String, fmt::Error> {
    render(|out| write_admin(out, overview))
}

fn write_students_page(out: &mut impl Write, view: &PageView<'_, Student>) -> fmt::Result {
    writeln!(out, "Students ({} in view)", view.filtered_count)?;
    if view.items.is_empty() {
        return writeln!(out, "  no students match");
    }
    for student in &view.items {
        let cgpa = student
            .cgpa
            .map_or_else(|| "-".to_string(), |c| format!("{c:.1}"));
        let status = if student.placed { "placed" } else { "available" };
        writeln!(
            out,
            "  #{:<4} {:<20} {:<28} cgpa {:<4} {:<9} {}",
            student.id,
            student.name,
            student.email,
            cgpa,
            status,
            student.skills.join(", ")
        )?;
    }
    writeln!(
        out,
        "Showing {}-{} of {} | page {} of {} | prev: {} | next: {}",
        view.first_index(),
        view.last_index(),
        view.filtered_count,
        view.page,
        view.total_pages,
        on_off(view.has_prev()),
        on_off(view.has_next()),
    )
}

fn write_student_profile(out: &mut impl Write, student: &Student) -> fmt::Result {
    writeln!(out, "{} (#{})", student.name, student.id)?;
    writeln!(out, "  email:       {}", student.email)?;
    if let Some(phone) = &student.phone {
        writeln!(out, "  phone:       {phone}")?;
    }
    if let Some(cgpa) = student.cgpa {
        writeln!(out, "  cgpa:        {cgpa:.2}")?;
    }
    writeln!(out, "  placed:      {}", if student.placed { "yes" } else { "no" })?;
    writeln!(out, "  skills:      {}", student.skills.join(", "))?;
    for internship in &student.internships {
        writeln!(out, "  internship:  {internship}")?;
    }
    for project in &student.projects {
        let text = project
            .as_str()
            .map_or_else(|| project.to_string(), str::to_string);
        writeln!(out, "  project:     {text}")?;
    }
    Ok(())
}

fn write_placements(out: &mut impl Write, placements: &[Placement]) -> fmt::Result {
    writeln!(out, "Placements ({})", placements.len())?;
    for p in placements {
        writeln!(
            out,
            "  #{:<4} {:<18} {:<22} {:>12} {:<10} {}",
            p.id, p.company, p.role, p.package, p.status, p.placed_date
        )?;
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, stats: &Stats) -> fmt::Result {
    writeln!(out, "Total students:  {}", stats.total_students)?;
    writeln!(out, "Placed:          {}", stats.placed_count)?;
    writeln!(out, "Placement rate:  {:.2}%", stats.placement_rate)?;
    writeln!(out, "Average CGPA:    {:.2}", stats.avg_cgpa)?;
    writeln!(out, "Average package: {:.0}", stats.avg_package)?;
    if stats.top_companies.is_empty() {
        return Ok(());
    }
    writeln!(out, "Top companies:")?;
    for company in &stats.top_companies {
        writeln!(
            out,
            "  {:<18} {:>3} hires  avg {:.0}",
            company.name, company.count, company.avg_package
        )?;
    }
    Ok(())
}

fn write_admin(out: &mut impl Write, overview: &AdminOverview) -> fmt::Result {
    writeln!(
        out,
        "Total students:  {} ({} placed)",
        overview.total_students, overview.placed_count
    )?;
    writeln!(
        out,
        "Placement rate:  {}% ({})",
        overview.placement_rate,
        overview.placed_label()
    )?;
    writeln!(out, "Average CGPA:    {:.2}", overview.avg_cgpa)?;
    writeln!(out, "Top companies:   {}", overview.top_companies.join(", "))?;
    writeln!(out, "Recent placements:")?;
    if overview.recent_placements.is_empty() {
        writeln!(out, "  none yet")?;
    }
    for recent in &overview.recent_placements {
        writeln!(
            out,
            "  {:<20} {:<18} {:>12} {}",
            recent.student_name, recent.company, recent.package, recent.placed_date
        )?;
    }
    writeln!(out, "Skill demand:")?;
    for (skill, count) in &overview.top_skills {
        writeln!(out, "  {skill:<14} {count}")?;
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
