//! `subjects` and `programs` listing handlers

use super::{load_catalog, load_registry};
use program_finder::config::Config;
use program_finder::core::models::{Program, Requirements};
use program_finder::verbose;

/// Print every selectable subject
pub fn list_subjects(config: &Config) {
    let registry = load_registry(config);

    println!("\n=== Subjects ({}) ===\n", registry.len());
    let width = registry
        .iter()
        .map(|info| info.id.as_str().len())
        .max()
        .unwrap_or(0);
    for info in registry.iter() {
        println!("  {:<width$}  {}", info.id.as_str(), info.name);
    }
}

/// Print the catalog, optionally limited to one faculty
pub fn list_programs(config: &Config, faculty: Option<&str>) {
    let registry = load_registry(config);
    let catalog = load_catalog(config, &registry);

    let programs: Vec<&Program> = match faculty {
        Some(name) => catalog.by_faculty(name),
        None => catalog.programs().iter().collect(),
    };

    if programs.is_empty() {
        if let Some(name) = faculty {
            eprintln!("✗ No programs found for faculty '{name}'");
            eprintln!("  Faculties: {}", catalog.faculties().join(", "));
        } else {
            println!("✗ The catalog is empty");
        }
        return;
    }

    println!("\n=== Programs ({}) ===", programs.len());
    let mut current_faculty = "";
    for program in programs {
        if program.faculty != current_faculty {
            current_faculty = &program.faculty;
            println!("\n{current_faculty}");
        }
        println!(
            "  {} {} [{}] ({})",
            program.icon, program.title, program.id, program.duration
        );
        println!("      {}", requirement_summary(&program.requirements));
        verbose!("      {}", program.description);
    }
}

/// One-line summary such as `Maths 60%+, English 50%+, requires accounting`
fn requirement_summary(requirements: &Requirements) -> String {
    let mut parts = Vec::new();
    if let Some(math) = requirements.math_threshold() {
        if requirements.accepts_math_lit() {
            parts.push(format!("Maths or Maths Lit {math}+"));
        } else {
            parts.push(format!("Maths {math}+"));
        }
    }
    if let Some(english) = requirements.english_threshold() {
        parts.push(format!("English {english}+"));
    }
    if !requirements.required.is_empty() {
        let ids: Vec<&str> = requirements.required.iter().map(|id| id.as_str()).collect();
        parts.push(format!("requires {}", ids.join(", ")));
    }
    if !requirements.recommended.is_empty() {
        let ids: Vec<&str> = requirements
            .recommended
            .iter()
            .map(|id| id.as_str())
            .collect();
        parts.push(format!("recommends {}", ids.join(", ")));
    }

    if parts.is_empty() {
        "No formal requirements".to_string()
    } else {
        parts.join("; ")
    }
}
