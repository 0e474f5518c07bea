//! Role detection and consolidation
//!
//! One Role exists per (roleType, bearer) across all acts the bearer
//! participates in. The accumulator is keyed `roleType|bearerIRI` and
//! iterated in insertion order, so output order is first-observed-first.
//! Actual acts land in `realized_in`; prescribed/planned/hypothetical acts in
//! `would_be_realized_in`.

use indexmap::IndexMap;
use tagteam_core::{ids, vocab, Act, Role, RoleType};
use tracing::{debug, warn};

/// What role mapping needs to know about one potential bearer.
#[derive(Debug, Clone, Default)]
pub struct BearerInfo {
    pub label: String,
    pub is_person: bool,
    pub is_agentive: bool,
    /// Member ids when the bearer is an object aggregate of persons.
    pub member_ids: Vec<String>,
    /// Introducing preposition recorded on the Tier 1 referent.
    pub preposition: Option<String>,
}

/// Output of role detection: the role nodes plus the inverse
/// bearer → role-id edges to install on the bearers.
#[derive(Debug, Default)]
pub struct RoleSet {
    pub roles: Vec<Role>,
    pub bearer_roles: IndexMap<String, Vec<String>>,
}

struct RoleAccum {
    role_type: RoleType,
    bearer: String,
    /// (act iri, can realize) in observation order.
    acts: Vec<(String, bool)>,
}

/// Preposition- and person-driven role detector.
#[derive(Debug, Default, Clone)]
pub struct RoleDetector;

impl RoleDetector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect and consolidate roles for the given acts.
    #[must_use]
    pub fn detect(&self, acts: &[Act], bearers: &IndexMap<String, BearerInfo>) -> RoleSet {
        let mut accum: IndexMap<String, RoleAccum> = IndexMap::new();

        for act in acts {
            let can_realize = act.actuality.can_realize();
            let mut covered: Vec<&str> = Vec::new();

            if let Some(agent) = &act.has_agent {
                match bearers.get(agent) {
                    Some(info) if info.is_agentive => {
                        record(&mut accum, RoleType::Agent, agent, &act.id, can_realize);
                        covered.push(agent);
                    }
                    Some(_) => {
                        debug!(act = %act.id, bearer = %agent, "agent target cannot bear AgentRole");
                    }
                    None => warn!(act = %act.id, bearer = %agent, "unresolved agent reference"),
                }
            }

            if let Some(affected) = &act.affects {
                match bearers.get(affected) {
                    Some(info) => {
                        let role_type =
                            preposition_role(info).unwrap_or(RoleType::Patient);
                        record(&mut accum, role_type, affected, &act.id, can_realize);
                        covered.push(affected);
                    }
                    None => warn!(act = %act.id, bearer = %affected, "unresolved affects reference"),
                }
            }

            for participant in &act.has_participant {
                if covered.iter().any(|c| c == participant) {
                    continue;
                }
                let Some(info) = bearers.get(participant) else {
                    warn!(act = %act.id, bearer = %participant, "unresolved participant reference");
                    continue;
                };
                if !info.member_ids.is_empty() {
                    // Aggregate of persons: each member accumulates a patient role.
                    for member in &info.member_ids {
                        record(&mut accum, RoleType::Patient, member, &act.id, can_realize);
                    }
                    continue;
                }
                let role_type = preposition_role(info).unwrap_or(if info.is_person {
                    RoleType::Patient
                } else {
                    RoleType::Participant
                });
                record(&mut accum, role_type, participant, &act.id, can_realize);
            }
        }

        self.synthesize(accum, bearers)
    }

    fn synthesize(
        &self,
        accum: IndexMap<String, RoleAccum>,
        bearers: &IndexMap<String, BearerInfo>,
    ) -> RoleSet {
        let mut set = RoleSet::default();
        for (_, entry) in accum {
            let fragment = entry.role_type.label_fragment();
            let id = ids::role_id(fragment, entry.role_type.key(), &entry.bearer);
            let bearer_label = bearers
                .get(&entry.bearer)
                .map(|b| b.label.clone())
                .unwrap_or_else(|| entry.bearer.clone());

            let specific = entry.role_type.type_iri();
            let types = if specific == vocab::BFO_ROLE {
                vec![specific.to_string()]
            } else {
                vec![specific.to_string(), vocab::BFO_ROLE.to_string()]
            };

            let mut realized_in = Vec::new();
            let mut would_be_realized_in = Vec::new();
            for (act_iri, can_realize) in entry.acts {
                let bucket = if can_realize {
                    &mut realized_in
                } else {
                    &mut would_be_realized_in
                };
                if !bucket.contains(&act_iri) {
                    bucket.push(act_iri);
                }
            }

            set.bearer_roles
                .entry(entry.bearer.clone())
                .or_default()
                .push(id.clone());
            set.roles.push(Role {
                id,
                label: format!("{fragment} Role of {bearer_label}"),
                role_type: entry.role_type,
                types,
                inheres_in: entry.bearer,
                realized_in,
                would_be_realized_in,
            });
        }
        // is_bearer_of stays deduplicated even if a bearer repeats a role.
        for (_, roles) in set.bearer_roles.iter_mut() {
            roles.dedup();
        }
        set
    }
}

fn record(
    accum: &mut IndexMap<String, RoleAccum>,
    role_type: RoleType,
    bearer: &str,
    act_iri: &str,
    can_realize: bool,
) {
    let key = format!("{}|{}", role_type.key(), bearer);
    accum
        .entry(key)
        .or_insert_with(|| RoleAccum {
            role_type,
            bearer: bearer.to_string(),
            acts: Vec::new(),
        })
        .acts
        .push((act_iri.to_string(), can_realize));
}

/// Introducing-preposition → role type, sensitive to personhood for "with".
fn preposition_role(info: &BearerInfo) -> Option<RoleType> {
    match info.preposition.as_deref() {
        Some("for") => Some(RoleType::Beneficiary),
        Some("with") if info.is_person => Some(RoleType::Participant),
        Some("with") => Some(RoleType::Instrument),
        Some("to") => Some(RoleType::Recipient),
        Some("from") => Some(RoleType::Participant),
        _ => None,
    }
}
