use crate::analysis::AnalysisSummary;

pub fn to_json(summary: &AnalysisSummary) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

pub fn write_summary(out_dir: &std::path::Path, summary: &AnalysisSummary) -> anyhow::Result<()> {
    let json = to_json(summary)?;
    let path = out_dir.join("summary.json");
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
