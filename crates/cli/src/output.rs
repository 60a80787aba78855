//! Plain-text rendering of a [`View`]

use std::io::{self, Write};

use mybgg_core::{FacetKind, FacetView, Game, PageLink, View};

pub fn print_view(out: &mut impl Write, title: &str, view: &View, show_facets: bool) -> io::Result<()> {
    writeln!(out, "{}  ({})", title, view.stats)?;
    if !view.query.is_empty() {
        writeln!(out, "?{}", view.query)?;
    }
    writeln!(out)?;

    if view.past_end {
        writeln!(out, "Page {} is past the last page ({}).", view.page, view.total_pages)?;
    } else if view.no_results {
        writeln!(out, "No games match these filters.")?;
    } else {
        for game in &view.games {
            writeln!(out, "{}", game_line(game))?;
        }
    }

    if !view.pagination.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", pagination_line(&view.pagination))?;
    }

    if show_facets {
        for facet in view.facets.iter().filter(|f| f.kind != FacetKind::Slider) {
            writeln!(out)?;
            print_facet(out, facet)?;
        }
    }
    Ok(())
}

fn game_line(game: &Game) -> String {
    let rank = game
        .rank
        .filter(|&r| r > 0)
        .map(|r| format!("#{}", r))
        .unwrap_or_else(|| "-".to_string());
    let year = game.year.map(|y| y.to_string()).unwrap_or_default();
    let rating = game.rating.map(|r| format!("{:.1}", r)).unwrap_or_default();
    let complexity = game.complexity().map(|c| c.name()).unwrap_or("");
    let modified = game
        .last_modified_at()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!(
        "{:>7}  {:<40} {:>4}  {:>6}p  {:<12} {:>4}  {}",
        rank,
        game.name,
        year,
        game.player_summary(),
        complexity,
        rating,
        modified
    )
}

fn pagination_line(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Previous { .. } => "«".to_string(),
            PageLink::Next { .. } => "»".to_string(),
            PageLink::Ellipsis => "…".to_string(),
            PageLink::Page { number, current: true } => format!("[{}]", number),
            PageLink::Page { number, .. } => number.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_facet(out: &mut impl Write, facet: &FacetView) -> io::Result<()> {
    let marker = if facet.active { " *" } else { "" };
    writeln!(out, "{}{}", facet.title, marker)?;
    for option in facet.options.iter().filter(|o| o.visible) {
        let check = match (facet.kind, option.selected) {
            (FacetKind::Radio, true) => "(o)",
            (FacetKind::Radio, false) => "( )",
            (_, true) => "[x]",
            (_, false) => "[ ]",
        };
        let indent = "  ".repeat(option.level as usize + 1);
        writeln!(out, "{}{} {} ({})", indent, check, option.label, option.count)?;
    }
    Ok(())
}
