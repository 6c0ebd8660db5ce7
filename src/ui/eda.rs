use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

use crate::model::KNOWN_LABELS;

/// Number of synthetic rows sampled when the dataset is absent
const SYNTHETIC_SAMPLES: usize = 1000;

/// Fraction of positive reviews in the synthetic fallback
const SYNTHETIC_POSITIVE_RATE: f64 = 0.7;

/// Length distribution of the synthetic fallback (characters)
const SYNTHETIC_LENGTH_MEAN: f64 = 100.0;
const SYNTHETIC_LENGTH_STD: f64 = 30.0;

const HISTOGRAM_BUCKETS: usize = 20;
const TOP_WORDS_PER_LABEL: usize = 50;

/// Aggregated exploratory statistics served to the dashboard.
///
/// Pure display data: the dashboard renders the charts, this module only
/// aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct EdaReport {
    pub source: DataSource,
    pub sample_count: usize,
    pub length_histogram: Vec<HistogramBucket>,
    pub sentiment_counts: Vec<SentimentCount>,
    /// Per-label word frequencies, present only when the dataset carries a
    /// tokens column
    pub top_words: Option<Vec<LabelWordCounts>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Csv,
    Synthetic,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramBucket {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelWordCounts {
    pub label: String,
    pub words: Vec<WordCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// One row of the EDA dataset
#[derive(Debug, Clone, Deserialize)]
pub struct EdaRecord {
    pub length: f64,
    pub sentiment: String,
    #[serde(default)]
    pub tokens: Option<String>,
}

/// Build the dashboard report from the CSV at `path`, falling back to a
/// synthetic sample when the file is missing or unreadable.
pub fn build_report(path: &Path) -> EdaReport {
    match load_records(path) {
        Ok(records) => {
            info!(path = %path.display(), rows = records.len(), "EDA dataset loaded");
            aggregate(&records, DataSource::Csv)
        }
        Err(e) => {
            warn!(path = %path.display(), "EDA dataset unavailable ({}); using synthetic sample", e);
            let records = synthetic_records(SYNTHETIC_SAMPLES, &mut rand::thread_rng());
            aggregate(&records, DataSource::Synthetic)
        }
    }
}

fn load_records(path: &Path) -> Result<Vec<EdaRecord>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}

/// Sample a synthetic dataset matching the original dashboard's demo data:
/// lengths ~ Normal(100, 30), sentiment 70% positive / 30% negative.
pub fn synthetic_records<R: Rng>(n: usize, rng: &mut R) -> Vec<EdaRecord> {
    let lengths = Normal::new(SYNTHETIC_LENGTH_MEAN, SYNTHETIC_LENGTH_STD)
        .expect("synthetic length distribution parameters are constant and valid");

    (0..n)
        .map(|_| {
            let sentiment = if rng.gen_bool(SYNTHETIC_POSITIVE_RATE) {
                KNOWN_LABELS[1]
            } else {
                KNOWN_LABELS[0]
            };
            EdaRecord {
                length: lengths.sample(rng).max(1.0),
                sentiment: sentiment.to_string(),
                tokens: None,
            }
        })
        .collect()
}

/// Aggregate raw records into the report served to the dashboard
pub fn aggregate(records: &[EdaRecord], source: DataSource) -> EdaReport {
    EdaReport {
        source,
        sample_count: records.len(),
        length_histogram: length_histogram(records),
        sentiment_counts: sentiment_counts(records),
        top_words: top_words(records),
    }
}

fn length_histogram(records: &[EdaRecord]) -> Vec<HistogramBucket> {
    let lengths: Vec<f64> = records
        .iter()
        .map(|r| r.length)
        .filter(|l| l.is_finite())
        .collect();
    if lengths.is_empty() {
        return Vec::new();
    }

    let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
    let max = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBucket {
            start: min,
            end: max,
            count: lengths.len(),
        }];
    }

    let width = (max - min) / HISTOGRAM_BUCKETS as f64;
    let mut counts = vec![0usize; HISTOGRAM_BUCKETS];
    for length in &lengths {
        let bucket = (((length - min) / width) as usize).min(HISTOGRAM_BUCKETS - 1);
        counts[bucket] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

fn sentiment_counts(records: &[EdaRecord]) -> Vec<SentimentCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.sentiment.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| SentimentCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

fn top_words(records: &[EdaRecord]) -> Option<Vec<LabelWordCounts>> {
    if records.iter().all(|r| r.tokens.is_none()) {
        return None;
    }

    let mut per_label: BTreeMap<&str, HashMap<String, usize>> = BTreeMap::new();
    for record in records {
        let Some(tokens) = &record.tokens else {
            continue;
        };
        let counts = per_label.entry(record.sentiment.as_str()).or_default();
        for word in tokens.split_whitespace() {
            *counts.entry(word.to_lowercase()).or_default() += 1;
        }
    }

    Some(
        per_label
            .into_iter()
            .map(|(label, counts)| {
                let mut words: Vec<WordCount> = counts
                    .into_iter()
                    .map(|(word, count)| WordCount { word, count })
                    .collect();
                // Highest count first, alphabetical within ties
                words.sort_by(|a, b| b.count.cmp(&a.count).then(a.word.cmp(&b.word)));
                words.truncate(TOP_WORDS_PER_LABEL);
                LabelWordCounts {
                    label: label.to_string(),
                    words,
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_synthetic_fallback_distribution() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let records = synthetic_records(1000, &mut rng);
        assert_eq!(records.len(), 1000);

        let positive = records
            .iter()
            .filter(|r| r.sentiment == KNOWN_LABELS[1])
            .count();
        // 70/30 draw: allow generous sampling slack
        assert!((600..=800).contains(&positive), "positive = {}", positive);
        assert!(records.iter().all(|r| r.length >= 1.0));
    }

    #[test]
    fn test_aggregate_counts_and_histogram() {
        let records = vec![
            EdaRecord {
                length: 10.0,
                sentiment: "Tích cực".to_string(),
                tokens: None,
            },
            EdaRecord {
                length: 30.0,
                sentiment: "Tích cực".to_string(),
                tokens: None,
            },
            EdaRecord {
                length: 50.0,
                sentiment: "Tiêu cực".to_string(),
                tokens: None,
            },
        ];

        let report = aggregate(&records, DataSource::Csv);
        assert_eq!(report.sample_count, 3);
        assert_eq!(report.source, DataSource::Csv);
        assert!(report.top_words.is_none());

        let total: usize = report.length_histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);

        let positive = report
            .sentiment_counts
            .iter()
            .find(|c| c.label == "Tích cực")
            .unwrap();
        assert_eq!(positive.count, 2);
    }

    #[test]
    fn test_single_valued_lengths_collapse_to_one_bucket() {
        let records: Vec<EdaRecord> = (0..5)
            .map(|_| EdaRecord {
                length: 42.0,
                sentiment: "Tích cực".to_string(),
                tokens: None,
            })
            .collect();

        let report = aggregate(&records, DataSource::Csv);
        assert_eq!(report.length_histogram.len(), 1);
        assert_eq!(report.length_histogram[0].count, 5);
    }

    #[test]
    fn test_top_words_per_label() {
        let records = vec![
            EdaRecord {
                length: 20.0,
                sentiment: "Tích cực".to_string(),
                tokens: Some("tốt tốt đẹp".to_string()),
            },
            EdaRecord {
                length: 25.0,
                sentiment: "Tiêu cực".to_string(),
                tokens: Some("tệ kém".to_string()),
            },
        ];

        let report = aggregate(&records, DataSource::Csv);
        let top_words = report.top_words.unwrap();
        assert_eq!(top_words.len(), 2);

        let positive = top_words.iter().find(|w| w.label == "Tích cực").unwrap();
        assert_eq!(positive.words[0].word, "tốt");
        assert_eq!(positive.words[0].count, 2);
    }

    #[test]
    fn test_missing_csv_falls_back_to_synthetic() {
        let report = build_report(Path::new("/nonexistent/eda_data.csv"));
        assert_eq!(report.source, DataSource::Synthetic);
        assert_eq!(report.sample_count, SYNTHETIC_SAMPLES);
        assert!(!report.length_histogram.is_empty());
    }

    #[test]
    fn test_csv_file_is_parsed() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eda_data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "length,sentiment,tokens").unwrap();
        writeln!(file, "12.0,Tích cực,tốt đẹp").unwrap();
        writeln!(file, "80.0,Tiêu cực,tệ").unwrap();
        drop(file);

        let report = build_report(&path);
        assert_eq!(report.source, DataSource::Csv);
        assert_eq!(report.sample_count, 2);
        assert!(report.top_words.is_some());
    }
}
