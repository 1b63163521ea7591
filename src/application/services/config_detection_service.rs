//! Config Detection Service - Proposes an export configuration for a compendium
//!
//! Walks every document, recording text leaves and arrays of records that
//! carry text. Arrays become [`FieldConfig`] suggestions; text leaves are
//! reported so the user can see what else is translatable.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::entities::Compendium;
use crate::domain::value_objects::{non_blank, FieldConfig, DEFAULT_ID_KEY};

/// Path prefixes that never hold translatable text
const IGNORED_PREFIXES: [&str; 4] = ["_id", "flags", "ownership", "sort"];

/// Identifier candidates for array elements, in order of preference
const ID_CANDIDATES: [&str; 5] = ["id", "_id", "uuid", "key", "name"];

/// Sub-fields selected by default in a suggested configuration
const PRESELECTED_SUB_FIELDS: [&str; 2] = ["name", "description"];

const TEXT_SAMPLE_LENGTH: usize = 50;
const TEXT_SAMPLE_LIMIT: usize = 3;
const SUB_FIELD_SAMPLE_LENGTH: usize = 40;
const SUB_FIELD_SAMPLE_LIMIT: usize = 2;

/// A text leaf found in the documents
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub path: String,
    pub count: usize,
    pub samples: Vec<String>,
}

/// A text member of array elements
#[derive(Debug, Clone, PartialEq)]
pub struct SubField {
    pub name: String,
    pub count: usize,
    pub samples: Vec<String>,
}

/// An array of records holding text
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayField {
    pub path: String,
    /// Largest array seen at this path
    pub length: usize,
    pub id_key: Option<String>,
    pub sub_fields: Vec<SubField>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetectedField {
    Text(TextField),
    Array(ArrayField),
}

impl DetectedField {
    pub fn path(&self) -> &str {
        match self {
            Self::Text(field) => &field.path,
            Self::Array(field) => &field.path,
        }
    }
}

/// Result of analysing a compendium, in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAnalysis {
    pub document_count: usize,
    pub fields: Vec<DetectedField>,
}

impl FieldAnalysis {
    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&DetectedField> {
        self.fields.iter().find(|field| field.path() == path)
    }

    /// Human-readable listing of every detected field with its counts and samples
    pub fn report(&self) -> String {
        let mut report = format!(
            "{} document(s) analyzed, {} translatable field(s)\n",
            self.document_count,
            self.fields.len()
        );

        for field in &self.fields {
            match field {
                DetectedField::Text(text) => {
                    report.push_str(&format!("\n{} (text, found {} time(s))\n", text.path, text.count));
                    for sample in &text.samples {
                        report.push_str(&format!("    \"{sample}\"\n"));
                    }
                }
                DetectedField::Array(array) => {
                    report.push_str(&format!(
                        "\n{} (array, {} element(s), id key: {})\n",
                        array.path,
                        array.length,
                        array.id_key.as_deref().unwrap_or("none")
                    ));
                    for sub in &array.sub_fields {
                        report.push_str(&format!("    .{} ({} time(s))\n", sub.name, sub.count));
                        for sample in &sub.samples {
                            report.push_str(&format!("        \"{sample}\"\n"));
                        }
                    }
                }
            }
        }

        report
    }
}

#[derive(Default)]
struct Collector {
    fields: Vec<DetectedField>,
    index: HashMap<String, usize>,
}

impl Collector {
    fn visit_object(&mut self, object: &Map<String, Value>, prefix: &str) {
        for (key, value) in object {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            match value {
                Value::String(_) => {
                    if let Some(text) = non_blank(Some(value)) {
                        self.record_text(path, text);
                    }
                }
                Value::Array(elements) => {
                    if let Some(Value::Object(first)) = elements.first() {
                        self.record_array(path, first, elements);
                    }
                }
                Value::Object(nested) => self.visit_object(nested, &path),
                _ => {}
            }
        }
    }

    fn record_text(&mut self, path: String, text: &str) {
        let slot = self.slot(path, |path| {
            DetectedField::Text(TextField {
                path,
                count: 0,
                samples: Vec::new(),
            })
        });

        if let DetectedField::Text(field) = slot {
            field.count += 1;
            push_sample(&mut field.samples, text, TEXT_SAMPLE_LENGTH, TEXT_SAMPLE_LIMIT);
        }
    }

    fn record_array(&mut self, path: String, first: &Map<String, Value>, elements: &[Value]) {
        let mut sub_fields: Vec<SubField> = Vec::new();
        for element in elements.iter().filter_map(Value::as_object) {
            for (key, value) in element {
                let Some(text) = non_blank(Some(value)) else {
                    continue;
                };
                let position = match sub_fields.iter().position(|sub| sub.name == *key) {
                    Some(position) => position,
                    None => {
                        sub_fields.push(SubField {
                            name: key.clone(),
                            count: 0,
                            samples: Vec::new(),
                        });
                        sub_fields.len() - 1
                    }
                };
                let sub = &mut sub_fields[position];
                sub.count += 1;
                push_sample(&mut sub.samples, text, SUB_FIELD_SAMPLE_LENGTH, SUB_FIELD_SAMPLE_LIMIT);
            }
        }

        if sub_fields.is_empty() {
            return;
        }

        let id_key = ID_CANDIDATES
            .iter()
            .find(|candidate| first.contains_key(**candidate))
            .map(|candidate| candidate.to_string());

        let slot = self.slot(path, |path| {
            DetectedField::Array(ArrayField {
                path,
                length: 0,
                id_key: None,
                sub_fields: Vec::new(),
            })
        });

        if let DetectedField::Array(field) = slot {
            field.length = field.length.max(elements.len());
            if field.id_key.is_none() {
                field.id_key = id_key;
            }
            for sub in sub_fields {
                match field.sub_fields.iter_mut().find(|existing| existing.name == sub.name) {
                    Some(existing) => {
                        existing.count += sub.count;
                        for sample in sub.samples {
                            if existing.samples.len() < SUB_FIELD_SAMPLE_LIMIT
                                && !existing.samples.contains(&sample)
                            {
                                existing.samples.push(sample);
                            }
                        }
                    }
                    None => field.sub_fields.push(sub),
                }
            }
        }
    }

    fn slot(&mut self, path: String, create: impl FnOnce(String) -> DetectedField) -> &mut DetectedField {
        let position = match self.index.get(&path) {
            Some(position) => *position,
            None => {
                self.fields.push(create(path.clone()));
                self.index.insert(path, self.fields.len() - 1);
                self.fields.len() - 1
            }
        };
        &mut self.fields[position]
    }
}

fn push_sample(samples: &mut Vec<String>, text: &str, length: usize, limit: usize) {
    if samples.len() >= limit {
        return;
    }
    let sample = truncate(text, length);
    if !samples.contains(&sample) {
        samples.push(sample);
    }
}

fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let head: String = text.chars().take(length).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Service analysing compendiums for translatable structures
#[derive(Debug, Default)]
pub struct ConfigDetectionService;

impl ConfigDetectionService {
    pub fn new() -> Self {
        Self
    }

    /// Find translatable fields across every document of the compendium
    ///
    /// Host bookkeeping paths are dropped. Text leaves are kept when present
    /// at least once per two documents; arrays are always kept.
    pub fn analyze(&self, compendium: &Compendium) -> FieldAnalysis {
        let mut collector = Collector::default();
        for document in &compendium.documents {
            if let Value::Object(object) = document.as_value() {
                collector.visit_object(object, "");
            }
        }

        let document_count = compendium.documents.len();
        let fields = collector
            .fields
            .into_iter()
            .filter(|field| {
                !IGNORED_PREFIXES
                    .iter()
                    .any(|prefix| field.path().starts_with(prefix))
            })
            .filter(|field| match field {
                DetectedField::Text(text) => text.count * 2 >= document_count,
                DetectedField::Array(_) => true,
            })
            .collect();

        FieldAnalysis {
            document_count,
            fields,
        }
    }

    /// Turn detected arrays into field configurations
    ///
    /// `name` and `description` are selected when the elements carry them;
    /// otherwise every detected text member except the element id is kept.
    pub fn suggest_configs(&self, analysis: &FieldAnalysis) -> Vec<FieldConfig> {
        analysis
            .fields
            .iter()
            .filter_map(|field| match field {
                DetectedField::Array(array) => Some(array),
                DetectedField::Text(_) => None,
            })
            .map(|array| {
                let preselected: Vec<&str> = array
                    .sub_fields
                    .iter()
                    .map(|sub| sub.name.as_str())
                    .filter(|name| PRESELECTED_SUB_FIELDS.contains(name))
                    .collect();
                let sub_fields: Vec<&str> = if preselected.is_empty() {
                    array
                        .sub_fields
                        .iter()
                        .map(|sub| sub.name.as_str())
                        .filter(|name| array.id_key.as_deref() != Some(*name))
                        .collect()
                } else {
                    preselected
                };

                let field = array.path.rsplit('.').next().unwrap_or(&array.path);
                FieldConfig::new(field, array.path.clone(), format!("{field}_converter"))
                    .with_sub_fields(sub_fields)
                    .with_id_key(array.id_key.as_deref().unwrap_or(DEFAULT_ID_KEY))
            })
            .collect()
    }

    /// Configuration block ready to merge into the export configuration file
    pub fn render_config(&self, config_key: &str, configs: &[FieldConfig]) -> serde_json::Result<String> {
        let mut block = Map::new();
        block.insert(config_key.to_string(), serde_json::to_value(configs)?);
        serde_json::to_string_pretty(&block)
    }
}
