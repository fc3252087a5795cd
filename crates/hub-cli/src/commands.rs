use anyhow::{Context, Result};
use serde::Serialize;

use hub_catalog::HubCatalog;
use hub_index::{AggregationIndex, DoctorReport, IndexStatus, LazyIndex, RecommendOptions};
use hub_model::Requirement;

use crate::summary::{
    bulk_table, category_table, course_table, match_table, progress_table, recommendation_table,
    requirement_table,
};

/// Whether a command found what it was asked for; drives the exit code.
pub type Found = bool;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct CourseView<'a> {
    input: &'a str,
    code: Option<String>,
    name: Option<&'a str>,
    source_tag: Option<&'a str>,
    requirements: Vec<Requirement>,
}

pub fn run_lookup(index: &AggregationIndex, course: &str, json: bool) -> Result<Found> {
    let code = index.resolve_identifier(course);
    let view = CourseView {
        input: course,
        name: index.course_name(course),
        source_tag: code
            .as_deref()
            .and_then(|c| index.source_tag(&hub_model::normalize(c))),
        requirements: index.requirements_for(course),
        code,
    };
    let found = view.code.is_some();
    if json {
        print_json(&view)?;
        return Ok(found);
    }
    match &view.code {
        Some(code) => {
            println!("{code}  {}", view.name.unwrap_or(""));
            println!("Source: {}", view.source_tag.unwrap_or("-"));
            if view.requirements.is_empty() {
                println!("No hub requirements.");
            }
            for requirement in &view.requirements {
                println!("  - {requirement}");
            }
        }
        None => println!("{course}: not found"),
    }
    Ok(found)
}

pub fn run_bulk(index: &AggregationIndex, courses: &[String], json: bool) -> Result<Found> {
    let bulk = index.requirements_for_many(courses);
    let found = bulk.results.iter().all(|r| r.found);
    if json {
        print_json(&bulk)?;
        return Ok(found);
    }
    println!("{}", bulk_table(&bulk));
    let union: Vec<&str> = bulk.unique_requirements.iter().map(Requirement::as_str).collect();
    println!("Requirements covered ({}): {}", union.len(), union.join(", "));
    Ok(found)
}

pub fn run_hub(index: &AggregationIndex, requirement: &str, json: bool) -> Result<Found> {
    let codes = index.courses_for(requirement);
    if json {
        print_json(&codes)?;
        return Ok(!codes.is_empty());
    }
    let courses = index.all_courses();
    let rows = codes
        .iter()
        .map(|code| (code.as_str(), courses.get(code).map_or("", String::as_str)));
    println!("{}", course_table(rows));
    println!("{} course(s) satisfy {requirement}", codes.len());
    Ok(!codes.is_empty())
}

pub fn run_list(index: &AggregationIndex, json: bool) -> Result<Found> {
    let courses = index.all_courses();
    if json {
        print_json(&courses)?;
    } else {
        println!(
            "{}",
            course_table(courses.iter().map(|(c, n)| (c.as_str(), n.as_str())))
        );
        println!("{} course(s)", courses.len());
    }
    Ok(true)
}

pub fn run_name(index: &AggregationIndex, course: &str, json: bool) -> Result<Found> {
    let name = index.course_name(course);
    if json {
        print_json(&name)?;
    } else {
        match name {
            Some(name) => println!("{name}"),
            None => println!("{course}: not found"),
        }
    }
    Ok(name.is_some())
}

pub fn run_department(index: &AggregationIndex, department: &str, json: bool) -> Result<Found> {
    let codes = index.courses_in_department(department);
    if json {
        print_json(&codes)?;
        return Ok(!codes.is_empty());
    }
    let courses = index.all_courses();
    let rows = codes
        .iter()
        .map(|code| (code.as_str(), courses.get(code).map_or("", String::as_str)));
    println!("{}", course_table(rows));
    Ok(!codes.is_empty())
}

pub fn run_match(
    index: &AggregationIndex,
    requirements: &[String],
    min: usize,
    json: bool,
) -> Result<Found> {
    let matches = index.courses_matching_at_least(requirements, min);
    if json {
        print_json(&matches)?;
    } else {
        println!("{}", match_table(&matches));
        println!("{} course(s) satisfy at least {} of the given requirements", matches.len(), min.max(1));
    }
    Ok(!matches.is_empty())
}

pub fn run_progress(
    index: &AggregationIndex,
    catalog: &HubCatalog,
    courses: &[String],
    json: bool,
) -> Result<Found> {
    let progress = index.progress(courses, catalog);
    if json {
        print_json(&progress)?;
    } else {
        println!("{}", progress_table(&progress));
        println!("{}", category_table(&progress));
        if !progress.unresolved.is_empty() {
            println!("Not found: {}", progress.unresolved.join(", "));
        }
        if progress.is_complete() {
            println!("All hub requirements fulfilled.");
        }
    }
    Ok(progress.unresolved.is_empty())
}

pub fn run_recommend(
    index: &AggregationIndex,
    catalog: &HubCatalog,
    courses: &[String],
    options: &RecommendOptions,
    json: bool,
) -> Result<Found> {
    let picks = index.recommend(courses, catalog, options);
    if json {
        print_json(&picks)?;
    } else if picks.is_empty() {
        println!("No course advances an unfulfilled requirement.");
    } else {
        println!("{}", recommendation_table(&picks));
    }
    Ok(true)
}

pub fn run_requirements(index: &AggregationIndex, catalog: &HubCatalog, json: bool) -> Result<Found> {
    #[derive(Serialize)]
    struct Row<'a> {
        name: &'a str,
        category: Option<&'a str>,
        courses: usize,
    }

    let rows: Vec<Row<'_>> = catalog
        .requirements
        .iter()
        .map(|r| Row {
            name: r.requirement.as_str(),
            category: r.category.as_deref(),
            courses: index.courses_for(r.requirement.as_str()).len(),
        })
        .collect();
    if json {
        print_json(&rows)?;
    } else {
        println!(
            "{}",
            requirement_table(rows.iter().map(|r| (r.name, r.category, r.courses)))
        );
    }
    Ok(true)
}

/// Prints the build report; succeeds only when the index is ready.
pub fn run_doctor(index: &LazyIndex, catalog: &HubCatalog) -> Result<Found> {
    let report = DoctorReport::from_build(index.get(), catalog);
    print_json(&report)?;
    Ok(report.status == IndexStatus::Ready)
}
