pub mod json;
pub mod text;

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_signed_6(v: f64) -> String {
    format!("{:+.6}", v)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
