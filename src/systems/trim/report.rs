use std::fmt;

use crate::components::{ControlDescriptor, InitialConditions, TrimMode, TrimState};

/// Final value of one free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSummary {
    pub name: &'static str,
    /// In display units
    pub value: f64,
    pub unit: &'static str,
    pub tolerance: f64,
}

impl From<&ControlDescriptor> for ControlSummary {
    fn from(descriptor: &ControlDescriptor) -> Self {
        let kind = descriptor.kind();
        Self {
            name: kind.name(),
            value: descriptor.display_value(),
            unit: kind.unit().symbol(),
            tolerance: descriptor.tolerance,
        }
    }
}

/// Human readable summary of the last solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimReport {
    pub aircraft: String,
    pub mode: TrimMode,
    pub success: bool,
    pub cost: f64,
    pub evaluations: usize,
    pub improvements: usize,
    pub state: TrimState,
    pub controls: Vec<ControlSummary>,
    pub initial: InitialConditions,
    pub trimmed: InitialConditions,
}

impl fmt::Display for TrimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        writeln!(f, "Trim report: {} ({} mode)", self.aircraft, self.mode)?;
        writeln!(
            f,
            "  Status: {}",
            if self.success { "converged" } else { "not converged" }
        )?;
        writeln!(
            f,
            "  Cost: {:e} after {} evaluations, {} improvements",
            self.cost, self.evaluations, self.improvements
        )?;
        writeln!(f, "  State:")?;
        writeln!(
            f,
            "    u, v, w (m/s):   {:10.4} {:10.4} {:10.4}",
            s.velocity_body.x, s.velocity_body.y, s.velocity_body.z
        )?;
        writeln!(
            f,
            "    p, q, r (deg/s): {:10.4} {:10.4} {:10.4}",
            s.rates_body.x.to_degrees(),
            s.rates_body.y.to_degrees(),
            s.rates_body.z.to_degrees()
        )?;
        writeln!(
            f,
            "    alpha, beta (deg): {:8.4} {:8.4}",
            s.alpha.to_degrees(),
            s.beta.to_degrees()
        )?;
        writeln!(
            f,
            "    phi, theta, psi (deg): {:8.4} {:8.4} {:8.4}",
            s.phi.to_degrees(),
            s.theta.to_degrees(),
            s.psi.to_degrees()
        )?;

        writeln!(f, "  Controls:")?;
        for control in &self.controls {
            writeln!(
                f,
                "    {:<18} {:12.6} {:<3} (tolerance {:e})",
                control.name, control.value, control.unit, control.tolerance
            )?;
        }

        let (i, t) = (&self.initial, &self.trimmed);
        writeln!(f, "  Conditions (initial -> trimmed):")?;
        writeln!(
            f,
            "    Airspeed (m/s): {:.3} -> {:.3}",
            i.true_airspeed, t.true_airspeed
        )?;
        writeln!(f, "    Altitude (m):   {:.3} -> {:.3}", i.altitude, t.altitude)?;
        for (name, from, to) in [
            ("gamma", i.gamma, t.gamma),
            ("phi", i.phi, t.phi),
            ("theta", i.theta, t.theta),
            ("psi", i.psi, t.psi),
            ("alpha", i.alpha, t.alpha),
            ("beta", i.beta, t.beta),
        ] {
            writeln!(
                f,
                "    {:<6} (deg):   {:.4} -> {:.4}",
                name,
                from.to_degrees(),
                to.to_degrees()
            )?;
        }
        Ok(())
    }
}
