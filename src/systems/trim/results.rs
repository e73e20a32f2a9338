use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::components::TrimPoint;
use crate::systems::TrimError;

pub const RESULTS_HEADER: &str = "# iteration, costf, dT, dE, dA, dR, Phi (rad), Theta (rad), \
Psi (rad), uDot (m/s2), vDot (m/s2), wDot (m/s2), pDot (rad/s2), qDot (rad/s2), rDot (rad/s2), \
u (m/s), v (m/s), w (m/s), p (rad/s), q (rad/s), r (rad/s), alpha (rad), beta (rad), \
alphaDot (rad/s), betaDot (rad/s), Thrust (N)";

/// Comma separated log of improving evaluations.
pub struct ResultsWriter {
    sink: Box<dyn Write + Send + Sync>,
}

impl ResultsWriter {
    pub fn new(sink: impl Write + Send + Sync + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    pub fn create(path: impl AsRef<Path>) -> Result<Self, TrimError> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }

    pub fn write_header(&mut self) -> Result<(), TrimError> {
        writeln!(self.sink, "{}", RESULTS_HEADER)?;
        Ok(())
    }

    pub fn write_row(
        &mut self,
        iteration: usize,
        cost: f64,
        point: &TrimPoint,
    ) -> Result<(), TrimError> {
        let c = &point.commands;
        let columns = [
            cost,
            c.throttle,
            c.elevator,
            c.aileron,
            c.rudder,
            point.phi,
            point.theta,
            point.psi,
            point.linear_accel.x,
            point.linear_accel.y,
            point.linear_accel.z,
            point.angular_accel.x,
            point.angular_accel.y,
            point.angular_accel.z,
            point.velocity_body.x,
            point.velocity_body.y,
            point.velocity_body.z,
            point.rates_body.x,
            point.rates_body.y,
            point.rates_body.z,
            point.alpha,
            point.beta,
            point.alpha_dot,
            point.beta_dot,
            point.thrust,
        ];
        write!(self.sink, "{}", iteration)?;
        for value in columns {
            write!(self.sink, ", {}", value)?;
        }
        writeln!(self.sink)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), TrimError> {
        self.sink.flush()?;
        Ok(())
    }
}
