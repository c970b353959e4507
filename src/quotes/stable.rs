use crate::core::{SwapError, SwapResult, MAX_SOLVER_ITERATIONS, N_COINS, N_COINS_SQUARED};
use crate::quotes::wide::{div_or_zero, saturating_sub, to_u64, wide};
use crate::quotes::SwapCurve;
use log::trace;
use num_bigint::BigInt;
use num_traits::Zero;

/// StableSwap curve for two-asset pools.
///
/// Invariant: A * sum(x_i) * n**n + D = A * D * n**n + D**(n+1) / (n**n * prod(x_i))
pub struct StableCurve {
    amp: u64,
}

impl StableCurve {
    pub fn new(amp: u64) -> Self {
        Self { amp }
    }

    fn leverage(&self) -> SwapResult<u64> {
        self.amp.checked_mul(N_COINS).ok_or(SwapError::MathOverflow)
    }
}

/// Solve the invariant `D` for the given balances by Newton's method.
pub fn compute_d(leverage: u64, amount_a: u64, amount_b: u64) -> SwapResult<u64> {
    let sum_x = wide(amount_a) + wide(amount_b);
    if sum_x.is_zero() {
        return Ok(0);
    }

    let mut d = sum_x.clone();
    for iteration in 0..MAX_SOLVER_ITERATIONS {
        let d_previous = d.clone();
        d = compute_d_step(leverage, amount_a, amount_b, &d);
        if d == d_previous {
            trace!("compute_d converged after {} iterations", iteration + 1);
            break;
        }
    }

    to_u64(&d)
}

/// One Newton step:
/// d = (leverage * sum_x + d_product * n) * d / ((leverage - 1) * d + (n + 1) * d_product)
pub(crate) fn compute_d_step(leverage: u64, amount_a: u64, amount_b: u64, d: &BigInt) -> BigInt {
    let n = wide(N_COINS);
    let amount_a_times_n = wide(amount_a) * &n + 1;
    let amount_b_times_n = wide(amount_b) * &n + 1;
    let sum_x = wide(amount_a) + wide(amount_b);

    // D**3 / ((a*n + 1) * (b*n + 1)), divided stepwise to keep magnitudes bounded
    let mut d_product = d.clone();
    d_product = div_or_zero(&(d_product * d), &amount_a_times_n);
    d_product = div_or_zero(&(d_product * d), &amount_b_times_n);

    let numerator = (wide(leverage) * &sum_x + &d_product * &n) * d;
    let denominator = d * wide(leverage.saturating_sub(1)) + &d_product * (n + 1);

    div_or_zero(&numerator, &denominator)
}

/// Solve `y**2 + b*y = c` for the opposite reserve after one side moves to `new_reserve_in`.
///
/// c = D**(n+1) / (new_reserve_in * n**2 * leverage), b = new_reserve_in + D / leverage
pub fn solve_output(leverage: u64, new_reserve_in: u64, d: u64) -> BigInt {
    let d = wide(d);
    let c = div_or_zero(
        &d.pow((N_COINS + 1) as u32),
        &(wide(new_reserve_in) * wide(N_COINS_SQUARED) * wide(leverage)),
    );
    let b = wide(new_reserve_in) + div_or_zero(&d, &wide(leverage));

    let mut y = d.clone();
    for _ in 0..MAX_SOLVER_ITERATIONS {
        let y_previous = y.clone();
        y = div_or_zero(&(&y * &y + &c), &(&y * wide(2) + &b - &d));
        if y == y_previous {
            break;
        }
    }

    y
}

impl SwapCurve for StableCurve {
    fn output(&self, input_less_fee: u64, reserve_in: u64, reserve_out: u64) -> SwapResult<u64> {
        let leverage = self.leverage()?;
        let new_reserve_in = reserve_in
            .checked_add(input_less_fee)
            .ok_or(SwapError::MathOverflow)?;
        let d = compute_d(leverage, reserve_in, reserve_out)?;
        let new_reserve_out = solve_output(leverage, new_reserve_in, d);

        to_u64(&saturating_sub(&wide(reserve_out), &new_reserve_out))
    }

    fn input_less_fee(
        &self,
        output_amount: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> SwapResult<u64> {
        if output_amount > reserve_out {
            return Err(SwapError::EstimatedAmountExceedsReserve {
                requested: output_amount,
                available: reserve_out,
            });
        }

        let leverage = self.leverage()?;
        let d = compute_d(leverage, reserve_out, reserve_in)?;
        let new_reserve_in = solve_output(leverage, reserve_out - output_amount, d);

        to_u64(&saturating_sub(&new_reserve_in, &wide(reserve_in)))
    }

    /// Linearization from the derivative of the invariant over x.
    fn base_output(
        &self,
        input_less_fee: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> SwapResult<u64> {
        let invariant = wide(compute_d(self.leverage()?, reserve_in, reserve_out)?);
        let a: BigInt = wide(self.amp) * wide(16);
        let b: BigInt = a.clone();
        let c: BigInt = &invariant * wide(4) - &invariant * wide(self.amp) * wide(16);

        let numerator =
            (&a * wide(2) * wide(reserve_in) + &b * wide(reserve_out) + &c) * wide(reserve_out);
        let denominator = (&a * wide(reserve_in) + &b * wide(2) * wide(reserve_out) + &c) * wide(reserve_in);

        to_u64(&div_or_zero(&(wide(input_less_fee) * numerator), &denominator))
    }
}
