//! Lead status state machine
//!
//! Legal transitions:
//!
//! ```text
//! new            -> assigned | working (direct contact)
//! assigned       -> working | unresponsive
//! working        -> info_collected | unresponsive | disqualified
//! info_collected -> qualified (orchestrator only) | disqualified
//! unresponsive   -> working (re-engagement) | disqualified
//! ```
//!
//! `qualified` and `disqualified` are terminal; nothing leaves them.
//! `qualified` is only ever entered through the qualification orchestrator.

use serde::{Deserialize, Serialize};

/// Lead workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Fresh intake, not yet routed
    New,
    /// Routed to an owner, no contact yet
    Assigned,
    /// Active outreach in progress
    Working,
    /// Discovery complete, scoring inputs gathered
    InfoCollected,
    /// Contact attempts exhausted for now
    Unresponsive,
    /// Rejected, terminal
    Disqualified,
    /// Converted to Contact/Company/Deal, terminal
    Qualified,
}

impl LeadStatus {
    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: LeadStatus) -> bool {
        use LeadStatus::*;
        matches!(
            (self, next),
            (New, Assigned)
                | (New, Working)
                | (Assigned, Working)
                | (Assigned, Unresponsive)
                | (Working, InfoCollected)
                | (Working, Unresponsive)
                | (Working, Disqualified)
                | (InfoCollected, Qualified)
                | (InfoCollected, Disqualified)
                | (Unresponsive, Working)
                | (Unresponsive, Disqualified)
        )
    }

    /// Terminal states cannot be left and freeze scoring and sales-motion
    /// fields.
    pub fn is_terminal(self) -> bool {
        matches!(self, LeadStatus::Qualified | LeadStatus::Disqualified)
    }

    /// Whether the qualification orchestrator may convert a lead in this
    /// state. Only `info_collected` qualifies; there is no operator
    /// override from `working` or `unresponsive`.
    pub fn allows_qualification(self) -> bool {
        matches!(self, LeadStatus::InfoCollected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Assigned => "assigned",
            LeadStatus::Working => "working",
            LeadStatus::InfoCollected => "info_collected",
            LeadStatus::Unresponsive => "unresponsive",
            LeadStatus::Disqualified => "disqualified",
            LeadStatus::Qualified => "qualified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(LeadStatus::New),
            "assigned" => Some(LeadStatus::Assigned),
            "working" => Some(LeadStatus::Working),
            "info_collected" => Some(LeadStatus::InfoCollected),
            "unresponsive" => Some(LeadStatus::Unresponsive),
            "disqualified" => Some(LeadStatus::Disqualified),
            "qualified" => Some(LeadStatus::Qualified),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::LeadStatus::*;
    use super::*;

    const ALL: [LeadStatus; 7] = [
        New,
        Assigned,
        Working,
        InfoCollected,
        Unresponsive,
        Disqualified,
        Qualified,
    ];

    #[test]
    fn permitted_transitions_match_the_graph() {
        let permitted = [
            (New, Assigned),
            (New, Working),
            (Assigned, Working),
            (Assigned, Unresponsive),
            (Working, InfoCollected),
            (Working, Unresponsive),
            (Working, Disqualified),
            (InfoCollected, Qualified),
            (InfoCollected, Disqualified),
            (Unresponsive, Working),
            (Unresponsive, Disqualified),
        ];

        for from in ALL {
            for to in ALL {
                let expected = permitted.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{} -> {} should be {}",
                    from,
                    to,
                    expected
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for terminal in [Qualified, Disqualified] {
            assert!(terminal.is_terminal());
            for to in ALL {
                assert!(!terminal.can_transition_to(to));
            }
        }
    }

    #[test]
    fn no_self_transitions() {
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn only_info_collected_allows_qualification() {
        for status in ALL {
            assert_eq!(status.allows_qualification(), status == InfoCollected);
        }
    }

    #[test]
    fn qualification_cannot_skip_discovery() {
        // A lead must pass through working + info_collected; a perfect score
        // changes nothing about the graph.
        assert!(!New.can_transition_to(Qualified));
        assert!(!Working.can_transition_to(Qualified));
        assert!(!Unresponsive.can_transition_to(Qualified));
    }

    #[test]
    fn status_text_round_trips() {
        for status in ALL {
            assert_eq!(LeadStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(LeadStatus::parse("archived"), None);
    }
}
