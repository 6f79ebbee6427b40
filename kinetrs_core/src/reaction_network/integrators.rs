//! Time stepping for a [`ReactionNetwork`]
//!
//! All schemes share the mass-action rate law
//!
//! ```text
//! rate(r) = k_r * prod_{s in reactants(r)} [s]
//! ```
//!
//! where the product runs over the reactant multiset. One step of size `h` moves
//! `h * rate(r)` out of every reactant occurrence and into every product occurrence.
//! Nothing clamps concentrations, so an overly large step can drive them negative.

use crate::configuration::Integrator;
use crate::reaction_network::network::ReactionNetwork;

impl ReactionNetwork {
    /// Mass-action rate of every reaction at the current state, in registration order
    pub fn reaction_rates(&self) -> Vec<f64> {
        self.rates_at(&self.concentrations())
    }

    fn rates_at(&self, concentrations: &[f64]) -> Vec<f64> {
        self.reactions
            .iter()
            .zip(&self.resolved)
            .map(|(reaction, resolved)| {
                resolved
                    .reactants
                    .iter()
                    .fold(reaction.rate_constant(), |rate, &i| rate * concentrations[i])
            })
            .collect()
    }

    /// Per-species change over one step of size `time_step` with rates evaluated at
    /// `concentrations`. Species no reaction touches get 0.
    fn stage_delta(&self, concentrations: &[f64], time_step: f64) -> Vec<f64> {
        let mut delta = vec![0.; concentrations.len()];
        for (rate, resolved) in self.rates_at(concentrations).iter().zip(&self.resolved) {
            for &i in &resolved.reactants {
                delta[i] -= time_step * rate;
            }
            for &i in &resolved.products {
                delta[i] += time_step * rate;
            }
        }
        delta
    }

    /// Advance the network by one explicit Euler step
    ///
    /// All rates are captured from the state at the start of the step, then the changes are
    /// applied to the concentrations reaction by reaction, in registration order.
    ///
    /// # Examples
    /// ```rust
    /// use kinetrs_core::io::spec_parse::parse_specification;
    /// let mut network = parse_specification("A B\nA - B 2.0\n").unwrap();
    /// network.set_concentration("A", 1.0).unwrap();
    /// network.step_euler(0.1);
    /// assert!((network.concentration("A").unwrap() - 0.8).abs() < 1e-12);
    /// ```
    pub fn step_euler(&mut self, time_step: f64) {
        let rates = self.reaction_rates();
        for (rate, resolved) in rates.iter().zip(&self.resolved) {
            for &i in &resolved.reactants {
                self.species[i] -= time_step * rate;
            }
            for &i in &resolved.products {
                self.species[i] += time_step * rate;
            }
        }
    }

    /// Advance the network by one Euler step with every species updated at once
    ///
    /// The changes of all reactions are summed per species before being added to the
    /// concentrations. Mathematically this is the same step as [`ReactionNetwork::step_euler`];
    /// the results differ only by floating point summation order.
    pub fn step_euler_simultaneous(&mut self, time_step: f64) {
        let delta = self.stage_delta(&self.concentrations(), time_step);
        for (c, d) in self.species.values_mut().zip(delta) {
            *c += d;
        }
    }

    /// Advance the network by one Euler step and report whether it is at equilibrium
    ///
    /// Returns true iff no species changed by more than `cutoff` over the step.
    pub fn step_euler_with_convergence(&mut self, cutoff: f64, time_step: f64) -> bool {
        let before = self.concentrations();
        self.step_euler(time_step);
        self.species
            .values()
            .zip(before)
            .all(|(after, before)| (after - before).abs() <= cutoff)
    }

    /// Advance the network by one classical fourth order Runge-Kutta step
    ///
    /// The four stage changes are computed from the start state and combined with weights
    /// 1/6, 1/3, 1/3, 1/6 before any concentration is written.
    pub fn step_rk4(&mut self, time_step: f64) {
        let state = self.concentrations();
        let d1 = self.stage_delta(&state, time_step);
        let d2 = self.stage_delta(&offset(&state, &d1, 0.5), time_step);
        let d3 = self.stage_delta(&offset(&state, &d2, 0.5), time_step);
        let d4 = self.stage_delta(&offset(&state, &d3, 1.), time_step);
        for (i, c) in self.species.values_mut().enumerate() {
            *c += d1[i] / 6. + d2[i] / 3. + d3[i] / 3. + d4[i] / 6.;
        }
    }

    /// Advance the network by one step of the chosen scheme
    pub fn step(&mut self, integrator: Integrator, time_step: f64) {
        match integrator {
            Integrator::Euler => self.step_euler(time_step),
            Integrator::EulerSimultaneous => self.step_euler_simultaneous(time_step),
            Integrator::Rk4 => self.step_rk4(time_step),
        }
    }
}

/// `state + scale * delta`, element-wise
fn offset(state: &[f64], delta: &[f64], scale: f64) -> Vec<f64> {
    state
        .iter()
        .zip(delta)
        .map(|(c, d)| c + scale * d)
        .collect()
}
