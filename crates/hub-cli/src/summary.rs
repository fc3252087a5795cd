//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hub_index::{BulkLookup, HubProgress, Recommendation, RequirementMatch};
use hub_model::Requirement;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn requirement_list(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(Requirement::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-column code/name listing.
pub fn course_table<'a, I>(rows: I) -> Table
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut table = Table::new();
    table.set_header(vec![header_cell("Course"), header_cell("Name")]);
    apply_table_style(&mut table);
    for (code, name) in rows {
        table.add_row(vec![code_cell(code), Cell::new(name)]);
    }
    table
}

pub fn bulk_table(bulk: &BulkLookup) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Course"),
        header_cell("Source"),
        header_cell("Requirements"),
    ]);
    apply_table_style(&mut table);
    for result in &bulk.results {
        let course = match &result.resolved_code {
            Some(code) => code_cell(code),
            None => Cell::new("not found").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&result.input),
            course,
            dim_cell(result.source_tag.as_deref().unwrap_or("-")),
            Cell::new(requirement_list(&result.requirements)),
        ]);
    }
    table
}

pub fn match_table(matches: &[RequirementMatch]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Course"),
        header_cell("Name"),
        header_cell("Matched"),
    ]);
    apply_table_style(&mut table);
    for m in matches {
        table.add_row(vec![
            code_cell(&m.code),
            Cell::new(&m.name),
            Cell::new(requirement_list(&m.matched)),
        ]);
    }
    table
}

pub fn progress_table(progress: &HubProgress) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Requirement"),
        header_cell("Units"),
        header_cell("Courses"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for target in &progress.targets {
        let units = format!("{}/{}", target.current, target.required);
        let units = if target.fulfilled {
            Cell::new(units).fg(Color::Green).add_attribute(Attribute::Bold)
        } else if target.current > 0 {
            Cell::new(units).fg(Color::Yellow)
        } else {
            dim_cell(units)
        };
        table.add_row(vec![
            dim_cell(&target.category),
            Cell::new(&target.name),
            units,
            Cell::new(target.courses.join("\n")),
        ]);
    }
    table
}

pub fn category_table(progress: &HubProgress) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Fulfilled"),
        header_cell("Progress"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for category in &progress.categories {
        let percent = format!("{}%", category.percent);
        let percent = if category.percent >= 100 {
            Cell::new(percent).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(percent)
        };
        table.add_row(vec![
            Cell::new(&category.category),
            Cell::new(format!("{}/{}", category.fulfilled, category.total)),
            percent,
        ]);
    }
    table
}

pub fn recommendation_table(picks: &[Recommendation]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Course"),
        header_cell("Name"),
        header_cell("Score"),
        header_cell("Advances"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for pick in picks {
        table.add_row(vec![
            code_cell(&pick.code),
            Cell::new(&pick.name),
            Cell::new(pick.score).add_attribute(Attribute::Bold),
            Cell::new(pick.advances.join("\n")),
        ]);
    }
    table
}

/// Catalog requirements with category and number of satisfying courses.
pub fn requirement_table<'a, I>(rows: I) -> Table
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>, usize)>,
{
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Requirement"),
        header_cell("Category"),
        header_cell("Courses"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, category, count) in rows {
        let count = if count == 0 {
            dim_cell(count)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![
            Cell::new(name),
            dim_cell(category.unwrap_or("-")),
            count,
        ]);
    }
    table
}
