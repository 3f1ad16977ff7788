//! Resolves a loosely-formatted external record to at most one existing
//! employee. Strategies run in a fixed precedence order, first match wins,
//! and everything is a pure function of the inputs, so re-running an import
//! on unchanged data proposes the same changes.

use crate::domain::models::employee::Employee;
use crate::domain::services::normalize::{normalize_name, normalize_phone};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub external_id: Option<String>,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ExternalIdentity {
    pub fn is_empty(&self) -> bool {
        self.external_id.is_none()
            && self.phone_number.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

type Strategy = fn(&ExternalIdentity, &[Employee]) -> Option<usize>;

/// Precedence: external id, then phone, then full name, then single name
/// fields. Keeping the list explicit keeps each rule independently testable.
const STRATEGIES: &[Strategy] = &[
    match_by_external_id,
    match_by_phone,
    match_by_full_name,
    match_by_single_name,
];

pub fn match_employee<'a>(
    identity: &ExternalIdentity,
    candidates: &'a [Employee],
) -> Option<&'a Employee> {
    for strategy in STRATEGIES {
        if let Some(idx) = strategy(identity, candidates) {
            return Some(&candidates[idx]);
        }
    }
    None
}

fn match_by_external_id(identity: &ExternalIdentity, candidates: &[Employee]) -> Option<usize> {
    let needle = identity.external_id.as_deref()?.trim();
    if needle.is_empty() {
        return None;
    }
    candidates
        .iter()
        .position(|c| c.external_id.as_deref().is_some_and(|id| id.trim() == needle))
}

fn match_by_phone(identity: &ExternalIdentity, candidates: &[Employee]) -> Option<usize> {
    let needle = normalize_phone(identity.phone_number.as_deref()?);
    if needle.is_empty() {
        return None;
    }
    candidates.iter().position(|c| {
        c.phone_number
            .as_deref()
            .is_some_and(|p| normalize_phone(p) == needle)
    })
}

fn match_by_full_name(identity: &ExternalIdentity, candidates: &[Employee]) -> Option<usize> {
    let first = identity.first_name.as_deref().map(normalize_name)?;
    let last = identity.last_name.as_deref().map(normalize_name)?;
    if first.is_empty() || last.is_empty() {
        return None;
    }
    let first_last = format!("{} {}", first, last);
    let last_first = format!("{} {}", last, first);

    candidates.iter().position(|c| {
        let full = normalize_name(&c.full_name());
        full == first_last || full == last_first
    })
}

fn match_by_single_name(identity: &ExternalIdentity, candidates: &[Employee]) -> Option<usize> {
    let first = identity
        .first_name
        .as_deref()
        .map(normalize_name)
        .filter(|s| !s.is_empty());
    let last = identity
        .last_name
        .as_deref()
        .map(normalize_name)
        .filter(|s| !s.is_empty());

    if let Some(first) = &first {
        if let Some(idx) = candidates
            .iter()
            .position(|c| normalize_name(&c.first_name) == *first)
        {
            return Some(idx);
        }
    }
    if let Some(last) = &last {
        if let Some(idx) = candidates
            .iter()
            .position(|c| normalize_name(&c.last_name) == *last)
        {
            return Some(idx);
        }
    }
    None
}
