// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod exporter;
pub mod owners;
pub mod plans;
pub mod reports;
pub mod search;
pub mod transactions;
