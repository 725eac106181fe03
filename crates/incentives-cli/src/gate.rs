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


//! Operator confirmation between interactive steps.

use anyhow::Result;
use inquire::Text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Run,
    Skip,
    End,
}

impl Gate {
    /// `run` and `skip` are accepted case-insensitively. Anything else ends the session.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "run" => Gate::Run,
            "skip" => Gate::Skip,
            _ => Gate::End,
        }
    }
}

/// Ask whether to run `step`. Returns [Gate::Run] without prompting when not interactive.
pub fn ask(step: &str, interactive: bool) -> Result<Gate> {
    if !interactive {
        return Ok(Gate::Run);
    }
    let answer = Text::new(&format!("Next step: {step}. run, skip or end?"))
        .with_default("run")
        .prompt()?;
    let gate = Gate::from_answer(&answer);
    if gate == Gate::End {
        tracing::info!("Ending at {step}");
    }
    Ok(gate)
}
