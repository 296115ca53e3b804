use crate::analysis::AnalysisSummary;

pub fn render_report(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "The region with the lowest SIMD rank is {}.\n",
        summary.region
    ));
    out.push_str(&format!(
        "The lowest average SIMD rank is {:.2}.\n",
        summary.average_rank
    ));
    let population = match summary.population {
        Some(n) => n.to_string(),
        None => "unknown".to_string(),
    };
    out.push_str(&format!(
        "The total population of {} and under in the region with the lowest SIMD rank is {}.\n",
        summary.age_boundary, population
    ));
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
