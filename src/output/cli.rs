use tabled::{settings::Style, Table, Tabled};

use crate::model::{ExtractResult, ScanRow, SearchHit};

#[derive(Tabled)]
struct DependencyRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Library")]
    library: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Type")]
    ecosystem: String,
    #[tabled(rename = "Purl")]
    purl: String,
}

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Snippet")]
    snippet: String,
}

#[derive(Tabled)]
struct CpeRow {
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "CPE")]
    cpe: String,
}

pub fn print_extract_table(result: &ExtractResult) {
    println!();
    println!(
        "Scan completed at: {}",
        result.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if result.records.is_empty() {
        println!(
            "No dependencies found across {} projects.",
            result.project_count
        );
        return;
    }

    println!(
        "Found {} dependencies across {} projects:",
        result.records.len(),
        result.project_count
    );
    println!();

    let rows: Vec<DependencyRow> = result
        .records
        .iter()
        .map(|r| DependencyRow {
            project: truncate(&r.project, 30),
            library: truncate(&r.library, 40),
            version: r.version.clone(),
            ecosystem: r.ecosystem.to_string(),
            purl: truncate(&r.purl, 60),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn print_search_table(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No matches found.");
        return;
    }

    println!("Found {} matches:", hits.len());
    println!();

    let rows: Vec<SearchRow> = hits
        .iter()
        .map(|h| SearchRow {
            project: h.project_name.clone().unwrap_or_else(|| "-".to_string()),
            file: h.file_path.clone().unwrap_or_else(|| "-".to_string()),
            line: h
                .line_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            snippet: truncate(h.snippet.as_deref().unwrap_or("-"), 60),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn print_cpe_table(rows: &[ScanRow]) {
    if rows.is_empty() {
        println!("No rows converted.");
        return;
    }

    println!("Converted {} rows:", rows.len());
    println!();

    let table_rows: Vec<CpeRow> = rows
        .iter()
        .map(|r| CpeRow {
            vendor: truncate(&r.vendor, 30),
            product: truncate(&r.product, 30),
            version: r.version.clone(),
            cpe: truncate(&r.cpe, 60),
        })
        .collect();

    let table = Table::new(table_rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_shortens_long_strings() {
        let result = truncate("a-very-long-library-name", 10);
        assert_eq!(result, "a-very-...");
        assert_eq!(result.chars().count(), 10);
    }
}
