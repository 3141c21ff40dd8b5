// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Display utilities for consistent CLI output formatting

use std::fmt::Display;

use alloy::primitives::U256;
use anyhow::Result;
use bookkeeper_rewards::{EpochSummary, OutputUnit};
use colored::Colorize;

/// Standard display formatter for CLI output
#[derive(Default)]
pub struct DisplayManager;

impl DisplayManager {
    /// Create a new display manager
    pub fn new() -> Self {
        Self
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        println!("\n{}", title.bold());
    }

    /// Print a labeled value with standard indentation
    pub fn item(&self, label: &str, value: impl Display) {
        println!("  {:<16} {}", format!("{}:", label), value);
    }

    /// Print a labeled value with custom color
    pub fn item_colored(&self, label: &str, value: impl Display, color: &str) {
        let colored_value = match color {
            "green" => value.to_string().green().to_string(),
            "cyan" => value.to_string().cyan().to_string(),
            "yellow" => value.to_string().yellow().to_string(),
            "dimmed" => value.to_string().dimmed().to_string(),
            _ => value.to_string(),
        };
        println!("  {:<16} {}", format!("{}:", label), colored_value);
    }

    /// Print an amount of Rau in the given unit
    pub fn amount(&self, label: &str, rau: U256, unit: OutputUnit) -> Result<()> {
        println!(
            "  {:<16} {} {}",
            format!("{}:", label),
            unit.format(rau)?.green().bold(),
            unit.to_string().green()
        );
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("\n{} {}", "✓".green().bold(), message.green().bold());
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        println!("\n{} {}", "⚠".yellow(), message.yellow());
    }

    /// Print a note or additional info
    pub fn note(&self, message: &str) {
        println!("  {}", message.dimmed());
    }

    /// Print one processed epoch
    pub fn epoch(&self, summary: &EpochSummary, unit: OutputUnit) -> Result<()> {
        println!("  Epoch {}", summary.epoch.to_string().cyan().bold());
        self.item_colored("Gravity height", summary.gravity_height, "dimmed");
        self.item_colored("Reward address", &summary.reward_address, "dimmed");
        self.amount("Reward", summary.total_reward, unit)?;
        self.amount("Distributed", summary.distributed, unit)
    }
}
