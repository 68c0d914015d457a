//! Status and Priority Values
//!
//! Closed sets of wire strings for the board status columns and priorities.
//! Any value may follow any other; there is no transition graph.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// An enum stored and sent as a fixed upper-case string
pub trait WireValue: Sized + Copy + 'static {
    /// Every value, in display order
    const ALL: &'static [Self];
    /// Used in error messages
    const KIND: &'static str;

    fn as_str(&self) -> &'static str;

    /// Parse a wire value (surrounding whitespace and case are ignored)
    fn parse(s: &str) -> DomainResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown {} '{}'", Self::KIND, s)))
    }

    /// Read a value back from a stored row. Unknown values fall back to the
    /// default and are logged with the row they came from.
    fn from_stored(raw: &str, row_id: u32) -> Self
    where
        Self: Default,
    {
        Self::parse(raw).unwrap_or_else(|_| {
            let fallback = Self::default();
            tracing::warn!(
                kind = Self::KIND,
                row_id,
                raw,
                fallback = fallback.as_str(),
                "unknown stored value"
            );
            fallback
        })
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl WireValue for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const KIND: &'static str = $kind;

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Sales pipeline stage
    LeadStatus, "lead status" {
        #[default]
        New => "NEW",
        Contacted => "CONTACTED",
        Qualified => "QUALIFIED",
        ProposalSent => "PROPOSAL SENT",
        Won => "WON",
        Lost => "LOST",
    }
}

wire_enum! {
    TaskStatus, "task status" {
        #[default]
        Todo => "TODO",
        InProgress => "IN_PROGRESS",
        Done => "DONE",
    }
}

wire_enum! {
    TicketStatus, "ticket status" {
        #[default]
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

wire_enum! {
    TaskPriority, "task priority" {
        Low => "LOW",
        #[default]
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

wire_enum! {
    TicketPriority, "ticket priority" {
        Low => "LOW",
        #[default]
        Medium => "MEDIUM",
        High => "HIGH",
        Urgent => "URGENT",
    }
}
