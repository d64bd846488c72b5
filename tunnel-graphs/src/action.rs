// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The ten stack actions a tunnel node can perform on a packet, and the pure semantics of
//! applying one to a stack.

use enumset::{EnumSet, EnumSetType};

use crate::symbol::StackSymbol;
use crate::symbol::StackSymbol::{V4, V6};

/// One of the ten legal stack actions. Variants are named `{kind}{top_before}{other}`, matching
/// the token grammar a node's `label` attribute is parsed against (see [`StackAction::from_token`]).
///
/// Each variant has a stable canonical index 0..9 ([`StackAction::canonical_index`]), used by
/// [`ActionSet`] for compact storage and by the SAT encoder for deterministic variable names.
#[derive(Debug, EnumSetType)]
pub enum StackAction {
    Transmit4,
    Transmit6,
    Push44,
    Push46,
    Push64,
    Push66,
    Pop44,
    Pop46,
    Pop64,
    Pop66,
}

/// The subset of the ten actions a node may perform, stored as a compact bitset.
pub type ActionSet = EnumSet<StackAction>;

/// The three structural families an action belongs to, per the data model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionKind {
    /// Leaves the stack unchanged.
    Transmit,
    /// Requires a top symbol, appends a new top.
    Push,
    /// Requires a top and the symbol below it, removes the top.
    Pop,
}

impl StackAction {
    /// All ten actions, in their canonical order (0..9).
    pub const ALL: [StackAction; 10] = [
        StackAction::Transmit4,
        StackAction::Transmit6,
        StackAction::Push44,
        StackAction::Push46,
        StackAction::Push64,
        StackAction::Push66,
        StackAction::Pop44,
        StackAction::Pop46,
        StackAction::Pop64,
        StackAction::Pop66,
    ];

    /// The stable 0..9 index used for bit-mask storage and SAT variable names.
    pub fn canonical_index(self) -> u8 {
        match self {
            StackAction::Transmit4 => 0,
            StackAction::Transmit6 => 1,
            StackAction::Push44 => 2,
            StackAction::Push46 => 3,
            StackAction::Push64 => 4,
            StackAction::Push66 => 5,
            StackAction::Pop44 => 6,
            StackAction::Pop46 => 7,
            StackAction::Pop64 => 8,
            StackAction::Pop66 => 9,
        }
    }

    pub fn kind(self) -> ActionKind {
        match self {
            StackAction::Transmit4 | StackAction::Transmit6 => ActionKind::Transmit,
            StackAction::Push44
            | StackAction::Push46
            | StackAction::Push64
            | StackAction::Push66 => ActionKind::Push,
            StackAction::Pop44 | StackAction::Pop46 | StackAction::Pop64 | StackAction::Pop66 => {
                ActionKind::Pop
            }
        }
    }

    /// The symbol that must be on top of the stack for this action to apply.
    pub fn top_before(self) -> StackSymbol {
        match self {
            StackAction::Transmit4 => V4,
            StackAction::Transmit6 => V6,
            StackAction::Push44 | StackAction::Push46 => V4,
            StackAction::Push64 | StackAction::Push66 => V6,
            StackAction::Pop44 | StackAction::Pop46 => V4,
            StackAction::Pop64 | StackAction::Pop66 => V6,
        }
    }

    /// For a push action, the symbol it pushes on top of `top_before`.
    pub fn pushed(self) -> Option<StackSymbol> {
        match self {
            StackAction::Push44 => Some(V4),
            StackAction::Push46 => Some(V6),
            StackAction::Push64 => Some(V4),
            StackAction::Push66 => Some(V6),
            _ => None,
        }
    }

    /// For a pop action, the symbol that must sit just below `top_before` and that becomes the
    /// new top once the action has applied.
    pub fn below(self) -> Option<StackSymbol> {
        match self {
            StackAction::Pop44 => Some(V4),
            StackAction::Pop46 => Some(V6),
            StackAction::Pop64 => Some(V4),
            StackAction::Pop66 => Some(V6),
            _ => None,
        }
    }

    /// The token this action is recognised from in a node's `label` attribute.
    pub fn token(self) -> &'static str {
        match self {
            StackAction::Transmit4 => "4→4",
            StackAction::Transmit6 => "6→6",
            StackAction::Push44 => "4↑44",
            StackAction::Push46 => "4↑46",
            StackAction::Push64 => "6↑64",
            StackAction::Push66 => "6↑66",
            StackAction::Pop44 => "44↓4",
            StackAction::Pop46 => "46↓4",
            StackAction::Pop64 => "64↓6",
            StackAction::Pop66 => "66↓6",
        }
    }

    /// Parses one `label` token into the action it denotes. Unrecognised tokens return `None`
    /// and are ignored by the caller (the label grammar is forgiving, per the parser contract).
    pub fn from_token(token: &str) -> Option<StackAction> {
        StackAction::ALL.iter().copied().find(|a| a.token() == token)
    }

    /// The dual action used by the stack-action round-trip property: `transmit` is self-dual,
    /// and `push(b, a)` is dual to `pop(b, a)`.
    pub fn dual(self) -> StackAction {
        match self {
            StackAction::Transmit4 => StackAction::Transmit4,
            StackAction::Transmit6 => StackAction::Transmit6,
            StackAction::Push44 => StackAction::Pop44,
            StackAction::Push46 => StackAction::Pop64,
            StackAction::Push64 => StackAction::Pop46,
            StackAction::Push66 => StackAction::Pop66,
            StackAction::Pop44 => StackAction::Push44,
            StackAction::Pop46 => StackAction::Push64,
            StackAction::Pop64 => StackAction::Push46,
            StackAction::Pop66 => StackAction::Push66,
        }
    }
}

/// Applies `action` to `stack` (the last element is the top), returning the resulting stack, or
/// `None` if `action`'s preconditions are not met. `stack` is never mutated when this returns
/// `None`.
pub fn apply(action: StackAction, stack: &[StackSymbol]) -> Option<Vec<StackSymbol>> {
    let top = *stack.last()?;
    if top != action.top_before() {
        return None;
    }
    match action.kind() {
        ActionKind::Transmit => Some(stack.to_vec()),
        ActionKind::Push => {
            let mut new_stack = stack.to_vec();
            new_stack.push(action.pushed().expect("push action has a pushed symbol"));
            Some(new_stack)
        }
        ActionKind::Pop => {
            if stack.len() < 2 {
                return None;
            }
            let below = stack[stack.len() - 2];
            if below != action.below().expect("pop action has a below symbol") {
                return None;
            }
            let mut new_stack = stack.to_vec();
            new_stack.pop();
            Some(new_stack)
        }
    }
}
