use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use democracy_score::api::{EngagementProfile, ProfileOrigin};
use democracy_score::dimensions::{Dimension, FULL_MARK};
use democracy_score::scorer::classify::TAG_TABLE;
use democracy_score::scorer::{DemocracyScore, ScoreDetails};

const BAR_WIDTH: usize = 20;

fn bar(value: u8) -> String {
    let filled = (value as usize * BAR_WIDTH) / FULL_MARK as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn value_cell(value: u8, baseline: u8) -> Cell {
    let cell = Cell::new(value).set_alignment(CellAlignment::Right);
    if value > baseline {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

pub fn print_chart(title: &str, score: &DemocracyScore) {
    println!("\n{}", title);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Dimension").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Base"),
        Cell::new(""),
        Cell::new("About"),
    ]);

    for (dim, s) in score.dimensions.iter() {
        table.add_row(vec![
            Cell::new(dim).add_attribute(Attribute::Bold),
            value_cell(s.value(), dim.baseline()),
            Cell::new(dim.baseline()).set_alignment(CellAlignment::Right),
            Cell::new(bar(s.value())),
            Cell::new(dim.description()),
        ]);
    }

    table.add_row(vec![
        Cell::new("Overall").add_attribute(Attribute::Bold),
        Cell::new(score.overall())
            .fg(Color::Cyan)
            .set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(bar(score.overall())),
        Cell::new(""),
    ]);
    println!("{}", table);
}

pub fn print_breakdown(details: &ScoreDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Dimension").add_attribute(Attribute::Bold),
        Cell::new("Events"),
        Cell::new("Srcs"),
        Cell::new("Lean"),
        Cell::new("Freq"),
        Cell::new("Div"),
        Cell::new("Bal"),
        Cell::new("Raw"),
        Cell::new("Sat"),
        Cell::new("Exact").fg(Color::Cyan),
    ]);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for b in &details.dimensions {
        let name = if b.used_baseline {
            Cell::new(format!("{} (baseline)", b.dimension)).fg(Color::Yellow)
        } else {
            Cell::new(b.dimension).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            name,
            Cell::new(b.events),
            Cell::new(b.distinct_sources),
            Cell::new(b.distinct_leanings),
            Cell::new(format!("{:.2}", b.frequency_signal)),
            Cell::new(format!("{:.2}", b.diversity_signal)),
            Cell::new(format!("{:.0}", b.balance_signal)),
            Cell::new(format!("{:.2}", b.raw_signal)),
            Cell::new(format!("{:.3}", b.saturation)),
            Cell::new(format!("{:.2}", b.exact_value)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);

    println!(
        "Events: {} total | {} classified | {} skipped | recency {}",
        details.total_events,
        details.classified_events,
        details.skipped_events,
        if details.recency_applied { "on" } else { "off" }
    );
    if !details.unknown_tags.is_empty() {
        println!("Unrecognised tags: {}", details.unknown_tags.join(", "));
    }
}

pub fn print_profile(profile: &EngagementProfile) {
    let title = format!("Democratic Engagement: {}", profile.user_id);
    print_chart(&title, &profile.score);
    match profile.origin {
        ProfileOrigin::Computed => println!("Scored {} events.", profile.events_scored),
        ProfileOrigin::Cached => println!("Served from cache."),
        ProfileOrigin::Fallback => println!(
            "Showing default profile: {}",
            profile.fallback_reason.as_deref().unwrap_or("unknown error")
        ),
    }
}

/// Ranked table, best overall first, with the delta to the leader.
pub fn print_batch_report(profiles: &[EngagementProfile]) {
    let Some(best) = profiles.first() else {
        println!("No histories found.");
        return;
    };
    let best_overall = best.score.overall() as i16;

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("User").add_attribute(Attribute::Bold)];
    for dim in Dimension::ALL {
        header.push(Cell::new(short_name(dim)));
    }
    header.push(Cell::new("Overall").fg(Color::Cyan));
    header.push(Cell::new("Delta"));
    header.push(Cell::new("Events"));
    table.add_row(header);

    for i in 1..=(Dimension::ALL.len() + 3) {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for p in profiles {
        let name = if p.is_degraded() {
            Cell::new(format!("{} (default)", p.user_id)).fg(Color::Red)
        } else if p.user_id == best.user_id {
            Cell::new(&p.user_id)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&p.user_id).add_attribute(Attribute::Bold)
        };

        let mut row = vec![name];
        for dim in Dimension::ALL {
            row.push(value_cell(p.score.get(dim), dim.baseline()));
        }
        row.push(Cell::new(p.score.overall()).fg(Color::Cyan));
        row.push(Cell::new(p.score.overall() as i16 - best_overall));
        row.push(Cell::new(p.events_scored));
        table.add_row(row);
    }
    println!("\n{}", table);
}

fn short_name(dim: Dimension) -> &'static str {
    match dim {
        Dimension::MediaFreedom => "Media",
        Dimension::ElectoralProcess => "Elect",
        Dimension::CivilLiberties => "Civil",
        Dimension::RuleOfLaw => "Law",
        Dimension::Deliberation => "Delib",
    }
}

pub fn print_tag_table() {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Tag").add_attribute(Attribute::Bold)];
    for dim in Dimension::ALL {
        header.push(Cell::new(short_name(dim)).set_alignment(CellAlignment::Center));
    }
    table.add_row(header);

    for (tag, dims) in TAG_TABLE {
        let mut row = vec![Cell::new(tag)];
        for dim in Dimension::ALL {
            let mark = if dims.contains(&dim) { "x" } else { "" };
            row.push(Cell::new(mark).set_alignment(CellAlignment::Center));
        }
        table.add_row(row);
    }
    println!("{}", table);
}
