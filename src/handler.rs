//! ADR handler port — the boundary the network server talks to.
//!
//! ```text
//!   Host ──▶ AdrHandler ──▶ adr::decide (pure)
//! ```
//!
//! A network server may load several ADR algorithms side by side and
//! pick one per device profile, so each handler identifies itself with a
//! stable id and a human-readable name.

use log::debug;

use crate::adr::{self, DecisionRequest, DecisionResult};
use crate::config::PluginConfig;
use crate::error::Result;

/// An ADR algorithm as seen by the host.
pub trait AdrHandler {
    /// Stable plugin identifier.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Compute the next configuration for one device.
    fn handle(&self, req: &DecisionRequest) -> Result<DecisionResult>;
}

/// The ALITECS ADR algorithm with operator overrides applied.
#[derive(Debug, Clone, Default)]
pub struct AlitecsHandler {
    force_adr_disabled: bool,
    installation_margin_override: Option<f32>,
}

impl AlitecsHandler {
    pub const ID: &'static str = "alitecs-adr";
    pub const NAME: &'static str = "ALITECS ADR algorithm";

    pub fn new(config: &PluginConfig) -> Self {
        Self {
            force_adr_disabled: config.force_adr_disabled,
            installation_margin_override: config.installation_margin_override,
        }
    }
}

impl AdrHandler for AlitecsHandler {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn handle(&self, req: &DecisionRequest) -> Result<DecisionResult> {
        let result = if self.force_adr_disabled || self.installation_margin_override.is_some() {
            let mut req = req.clone();
            req.adr_enabled &= !self.force_adr_disabled;
            if let Some(margin) = self.installation_margin_override {
                req.installation_margin = margin;
            }
            adr::decide(&req)
        } else {
            adr::decide(req)
        };

        debug!(
            "{}: DR {}->{} TXP {}->{} NbTrans {}->{}",
            Self::ID,
            req.data_rate,
            result.data_rate,
            req.tx_power_index,
            result.tx_power_index,
            req.nb_trans,
            result.nb_trans
        );

        Ok(result)
    }
}
