//! Duplicate detection over stored professionals.
//!
//! Four independent groupings are built over the same snapshot, so one
//! professional may show up in several groups at once.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::features::professionals::models::ProfessionalSummary;
use crate::shared::validation::{normalize_phone, normalize_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Email,
    Phone,
    Name,
    /// Same name and headline
    Similar,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Email => "email",
            MatchType::Phone => "phone",
            MatchType::Name => "name",
            MatchType::Similar => "similar",
        }
    }

    fn key(self, professional: &ProfessionalSummary) -> Option<String> {
        let key = match self {
            MatchType::Email => professional.email.as_deref().map(normalize_text),
            MatchType::Phone => professional.phone.as_deref().map(normalize_phone),
            MatchType::Name => Some(normalize_text(&professional.full_name)),
            MatchType::Similar => Some(format!(
                "{}|{}",
                normalize_text(&professional.full_name),
                normalize_text(&professional.headline)
            )),
        };
        key.filter(|key| !key.is_empty())
    }
}

/// Two or more stored professionals sharing a normalized key
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DuplicateGroup {
    /// Synthetic id, `<match_type>-<n>`; only stable within one scan
    pub id: String,
    pub match_type: MatchType,
    /// The normalized value the members share
    pub value: String,
    pub members: Vec<ProfessionalSummary>,
}

const MATCH_TYPES: [MatchType; 4] = [
    MatchType::Email,
    MatchType::Phone,
    MatchType::Name,
    MatchType::Similar,
];

fn group_by(match_type: MatchType, professionals: &[ProfessionalSummary]) -> Vec<DuplicateGroup> {
    // Keys in first-appearance order
    let mut keys: Vec<(String, Vec<&ProfessionalSummary>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for professional in professionals {
        let Some(key) = match_type.key(professional) else {
            continue;
        };
        match positions.get(&key) {
            Some(&i) => keys[i].1.push(professional),
            None => {
                positions.insert(key.clone(), keys.len());
                keys.push((key, vec![professional]));
            }
        }
    }

    keys.into_iter()
        .filter(|(_, members)| members.len() > 1)
        .enumerate()
        .map(|(n, (value, members))| DuplicateGroup {
            id: format!("{}-{}", match_type.as_str(), n + 1),
            match_type,
            value,
            members: members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Group `professionals` (oldest first) by every match type
pub fn detect_duplicates(professionals: &[ProfessionalSummary]) -> Vec<DuplicateGroup> {
    MATCH_TYPES
        .iter()
        .flat_map(|match_type| group_by(*match_type, professionals))
        .collect()
}
