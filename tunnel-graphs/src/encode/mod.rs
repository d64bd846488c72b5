// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! SAT encoders and model decoders: the reductions that let an external solver answer
//! reachability and colourability questions, per the shared [`crate::solver::SolverContext`]
//! façade.

pub mod colouring;
pub mod tunnel;
