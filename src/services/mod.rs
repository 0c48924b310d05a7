// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod crawler;
pub mod decoder;
pub mod extractor;
pub mod logging;
pub mod normalizer;
pub mod payload;
pub mod record;
