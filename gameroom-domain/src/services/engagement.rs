// Competition engagement and audience demographics

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::entities::{
    CompetitionEngagement, CompetitionFile, Demographics, DistributionFile, DistributionShare,
    EngagementPoint, COMPETITIONS_STEM, DISTRIBUTION_STEM,
};
use crate::errors::ReportError;
use crate::utils::parse_date;

pub fn competition_engagement(
    raw: Option<&Value>,
) -> Result<Vec<CompetitionEngagement>, ReportError> {
    let raw = raw.ok_or(ReportError::MissingDocument(COMPETITIONS_STEM))?;
    let file: CompetitionFile =
        serde_json::from_value(raw.clone()).map_err(|err| malformed(COMPETITIONS_STEM, err))?;

    file.competitions
        .into_iter()
        .enumerate()
        .map(|(index, competition)| -> Result<CompetitionEngagement, ReportError> {
            let points = competition
                .engagement_data
                .daily
                .into_iter()
                .map(|daily| -> Result<EngagementPoint, ReportError> {
                    Ok(EngagementPoint {
                        date: engagement_date(&daily.date)?,
                        seconds: duration_seconds(&daily.total_average_time)?,
                        total_average_time: daily.total_average_time,
                        observations: daily.observations.unwrap_or_default(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CompetitionEngagement {
                name: competition
                    .name
                    .unwrap_or_else(|| format!("Competition {}", index + 1)),
                points,
            })
        })
        .collect()
}

fn engagement_date(value: &str) -> Result<NaiveDate, ReportError> {
    if let Ok(date) = parse_date(value.trim()) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value.trim())
        .map(|instant| instant.date_naive())
        .map_err(|_| malformed(COMPETITIONS_STEM, format!("invalid date '{value}'")))
}

/// `H:MM:SS`, `MM:SS` or `SS` to whole seconds.
pub fn duration_seconds(value: &str) -> Result<u64, ReportError> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(malformed(
            COMPETITIONS_STEM,
            format!("invalid duration '{value}'"),
        ));
    }
    parts.iter().try_fold(0_u64, |total, part| -> Result<u64, ReportError> {
        part.trim()
            .parse::<u64>()
            .ok()
            .and_then(|part| total.checked_mul(60)?.checked_add(part))
            .ok_or_else(|| malformed(COMPETITIONS_STEM, format!("invalid duration '{value}'")))
    })
}

pub fn demographics(raw: Option<&Value>) -> Result<Demographics, ReportError> {
    let raw = raw.ok_or(ReportError::MissingDocument(DISTRIBUTION_STEM))?;
    let file: DistributionFile =
        serde_json::from_value(raw.clone()).map_err(|err| malformed(DISTRIBUTION_STEM, err))?;
    Ok(Demographics {
        gender: shares(&file.gender_distribution)?,
        age: shares(&file.age_distribution)?,
    })
}

fn shares(distribution: &Map<String, Value>) -> Result<Vec<DistributionShare>, ReportError> {
    distribution
        .iter()
        .map(|(label, value)| -> Result<DistributionShare, ReportError> {
            Ok(DistributionShare {
                label: label.clone(),
                percentage: percentage(label, value)?,
            })
        })
        .collect()
}

/// A bare number or a string like `"12.5%"`.
fn percentage(label: &str, value: &Value) -> Result<f64, ReportError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        malformed(
            DISTRIBUTION_STEM,
            format!("'{label}' is not a percentage: {value}"),
        )
    })
}

fn malformed(document: &'static str, reason: impl ToString) -> ReportError {
    ReportError::MalformedDocument {
        document,
        reason: reason.to_string(),
    }
}
