//! Downloadable example import files.

use serde_json::{Map, Value};

use crate::features::imports::parser::{ImportFormat, ImportTarget};

/// A generated template file
#[derive(Debug, Clone)]
pub struct Template {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

// Sample values must not contain commas; the CSV reader splits on them.
const CATEGORY_SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("name", "Plumbing"),
        ("status", "active"),
        ("description", "Pipe installation and repair"),
        ("icon", "🔧"),
    ],
    &[
        ("name", "Electrical"),
        ("status", "inactive"),
        ("description", "Wiring and lighting services"),
        ("icon", "⚡"),
    ],
];

const PROFESSIONAL_SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("full_name", "Jane Doe"),
        ("headline", "Licensed Plumber"),
        ("domain_name", "Plumbing"),
        ("address", "12 High Street"),
        ("available", "true"),
        ("bio", "Fifteen years of residential plumbing"),
        ("email", "jane.doe@example.com"),
        ("phone", "+1 555 0100"),
        ("website", "https://janedoe.example.com"),
        ("linkedin_url", "https://www.linkedin.com/in/janedoe"),
        ("instagram_url", "https://www.instagram.com/janedoe"),
        ("city", "Springfield"),
        ("image_url", "https://images.example.com/jane.jpg"),
    ],
    &[
        ("full_name", "John Roe"),
        ("headline", "Master Electrician"),
        ("domain_name", "Electrical"),
        ("address", "48 Oak Avenue"),
        ("available", "no"),
        ("bio", ""),
        ("email", "john.roe@example.com"),
        ("phone", "+1 555 0101"),
        ("website", ""),
        ("linkedin_url", ""),
        ("instagram_url", ""),
        ("city", "Shelbyville"),
        ("image_url", ""),
    ],
];

fn samples(target: ImportTarget) -> &'static [&'static [(&'static str, &'static str)]] {
    match target {
        ImportTarget::Category => CATEGORY_SAMPLES,
        ImportTarget::Professional => PROFESSIONAL_SAMPLES,
    }
}

fn sample_value(sample: &[(&str, &'static str)], column: &str) -> &'static str {
    sample
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, value)| *value)
        .unwrap_or("")
}

/// Header row plus two sample rows for `target` in `format`
pub fn template(target: ImportTarget, format: ImportFormat) -> Template {
    let columns = target.columns();
    let samples = samples(target);

    match format {
        ImportFormat::Csv => {
            let mut lines = vec![columns.join(",")];
            lines.extend(samples.iter().map(|sample| {
                columns
                    .iter()
                    .map(|column| sample_value(sample, column))
                    .collect::<Vec<_>>()
                    .join(",")
            }));
            Template {
                file_name: format!("{}_template.csv", target.as_str()),
                content_type: "text/csv; charset=utf-8",
                body: lines.join("\n") + "\n",
            }
        }
        ImportFormat::Json => {
            let records: Vec<Value> = samples
                .iter()
                .map(|sample| {
                    let object: Map<String, Value> = columns
                        .iter()
                        .map(|column| {
                            (
                                column.to_string(),
                                Value::String(sample_value(sample, column).to_string()),
                            )
                        })
                        .collect();
                    Value::Object(object)
                })
                .collect();
            Template {
                file_name: format!("{}_template.json", target.as_str()),
                content_type: "application/json",
                body: serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string()),
            }
        }
    }
}
