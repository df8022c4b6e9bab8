//! Fixed-step time integrator for the two-body chain
//!
//! One `chain_step` advances both bodies by `dt` and then the simulation
//! time, using net forces computed entirely from the state before either
//! body has moved.

use super::states::Chain;

/// Advance the chain by one fixed step
///
/// Both net forces are evaluated at the pre-step positions and velocities:
/// the coupling spring sees the same extension from both sides. Updating the
/// bodies sequentially against partially-updated state would change the
/// dynamics, so the simultaneous evaluation order here must stay as is.
pub fn chain_step(chain: &mut Chain, dt: f64) {
    let coupling_len = chain.body2.position - chain.body1.position;

    // Net force on body 1: external drive at the current time, anchor
    // spring at extension x1, coupling spring, damper
    let mut f1 = 0.0;
    f1 += chain.external.force(chain.t);
    f1 += chain.anchor_spring.force(chain.body1.position, true);
    f1 += chain.coupling_spring.force(coupling_len, false);
    f1 += chain.damper1.force(chain.body1.velocity);

    // Net force on body 2: coupling spring from the other side, far spring
    // evaluated on the remaining gap to the right anchor, damper
    let mut f2 = 0.0;
    f2 += chain.coupling_spring.force(coupling_len, true);
    f2 += chain.far_spring.force(chain.bound - chain.body2.position, false);
    f2 += chain.damper2.force(chain.body2.velocity);

    chain.body1.integrate(f1, dt);
    chain.body2.integrate(f2, dt);

    // t_n+1 = t_n + dt, after both bodies have moved
    chain.t += dt;
}
