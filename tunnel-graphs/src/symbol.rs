// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The closed alphabet of symbols that can appear on a tunnel stack.

use std::fmt;

/// One of the two symbols that can occupy a cell of the encapsulation stack.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StackSymbol {
    V4,
    V6,
}

impl StackSymbol {
    /// The symbol the bottom of every stack starts and ends as.
    pub const BOTTOM: StackSymbol = StackSymbol::V4;

    pub fn other(self) -> StackSymbol {
        match self {
            StackSymbol::V4 => StackSymbol::V6,
            StackSymbol::V6 => StackSymbol::V4,
        }
    }
}

impl fmt::Display for StackSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StackSymbol::V4 => write!(f, "4"),
            StackSymbol::V6 => write!(f, "6"),
        }
    }
}
