use crate::core::{
    IntermediaryTokenInfo, SwapError, SwapLeg, SwapResult, MAX_ROUTE_HOPS,
};
use crate::pool::Pool;
use crate::utils::to_base_units;
use log::debug;
use rust_decimal::Decimal;

/// One or two pools a swap passes through, in trade order.
///
/// For a transitive route, the first pool's token B is the second pool's
/// token A. Building such a route is up to the caller; only its length is
/// checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pools: Vec<Pool>,
}

impl Route {
    pub fn new(pools: Vec<Pool>) -> SwapResult<Self> {
        if pools.is_empty() || pools.len() > MAX_ROUTE_HOPS {
            return Err(SwapError::InvalidRoute(pools.len()));
        }
        Ok(Self { pools })
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Number of pools traded through, always 1 or 2.
    pub fn hop_count(&self) -> usize {
        self.pools.len()
    }

    pub fn is_direct(&self) -> bool {
        self.pools.len() == 1
    }

    /// Output of the last hop, feeding each hop's output into the next.
    pub fn output_amount(&self, input_amount: u64) -> SwapResult<u64> {
        self.pools
            .iter()
            .try_fold(input_amount, |amount, pool| pool.output_amount(amount))
    }

    /// Input for `estimated_output`, derived backward from the last hop.
    pub fn input_amount(&self, estimated_output: u64) -> SwapResult<u64> {
        self.pools
            .iter()
            .rev()
            .try_fold(estimated_output, |amount, pool| pool.input_amount(amount))
    }

    /// Slippage is applied once, at the final hop.
    pub fn minimum_amount_out(&self, input_amount: u64, slippage: f64) -> SwapResult<u64> {
        match self.pools.as_slice() {
            [pool] => pool.minimum_amount_out(input_amount, slippage),
            [first, last] => {
                let intermediary_amount = first.output_amount(input_amount)?;
                last.minimum_amount_out(intermediary_amount, slippage)
            }
            pools => Err(SwapError::InvalidRoute(pools.len())),
        }
    }

    /// Inverse of [`Route::minimum_amount_out`]; slippage is applied at every hop.
    pub fn input_amount_for(&self, minimum_amount_out: u64, slippage: f64) -> SwapResult<u64> {
        self.pools
            .iter()
            .rev()
            .try_fold(minimum_amount_out, |amount, pool| {
                pool.input_amount_for(amount, slippage)
            })
    }

    /// What the first hop of a transitive route hands to the second.
    /// `None` for a direct route.
    pub fn intermediary_token(
        &self,
        input_amount: u64,
        slippage: f64,
    ) -> SwapResult<Option<IntermediaryTokenInfo>> {
        let [first, last] = self.pools.as_slice() else {
            return Ok(None);
        };

        Ok(Some(IntermediaryTokenInfo {
            token_name: first.token_b_name.clone(),
            estimated_output: first.output_amount(input_amount)?,
            min_amount_out: first.minimum_amount_out(input_amount, slippage)?,
            is_next_hop_stable: last.is_stable(),
        }))
    }

    /// Fee kept by liquidity providers at each hop, valued in that hop's output token.
    ///
    /// `input_amount` is a human token amount, converted with the source token's decimals.
    /// The second hop is charged on the first hop's minimum out.
    pub fn liquidity_provider_fees(&self, input_amount: f64, slippage: f64) -> SwapResult<Vec<u64>> {
        let first = &self.pools[0];
        let decimals = first
            .token_a_decimals()
            .ok_or(SwapError::BalancesUnavailable)?;
        let input_amount = to_base_units(input_amount, decimals)?;

        let mut fees = vec![first.fees_in_output_token(input_amount)?];

        if let Some(second) = self.pools.get(1) {
            let intermediary_amount = first.minimum_amount_out(input_amount, slippage)?;
            fees.push(second.fees_in_output_token(intermediary_amount)?);
        }

        Ok(fees)
    }

    /// Price impact in percent against the fee-inclusive, slippage-free base output.
    ///
    /// `_output_amount` is accepted for API compatibility and does not enter the formula.
    pub fn price_impact_percent(&self, input_amount: u64, _output_amount: u64) -> SwapResult<Decimal> {
        let base_output = self
            .pools
            .iter()
            .try_fold(input_amount, |amount, pool| pool.base_output_amount(amount))?;

        if base_output == 0 {
            return Err(SwapError::InvalidAmount(
                "base output amount is zero".to_string(),
            ));
        }

        let base_output = Decimal::from(base_output);
        let input_amount = Decimal::from(input_amount);

        Ok((base_output - input_amount) / base_output * Decimal::ONE_HUNDRED)
    }

    /// Per-hop amounts for the swap instructions.
    ///
    /// A transitive route needs the trader's intermediary token account; the
    /// second hop spends the first hop's minimum out.
    pub fn swap_legs(
        &self,
        input_amount: u64,
        slippage: f64,
        source: &str,
        intermediary: Option<&str>,
        destination: &str,
    ) -> SwapResult<Vec<SwapLeg>> {
        match self.pools.as_slice() {
            [pool] => Ok(vec![leg(pool, source, destination, input_amount, slippage)?]),
            [first, last] => {
                let intermediary = intermediary.ok_or(SwapError::MissingIntermediaryToken)?;
                let first_leg = leg(first, source, intermediary, input_amount, slippage)?;
                let second_leg = leg(
                    last,
                    intermediary,
                    destination,
                    first_leg.minimum_amount_out,
                    slippage,
                )?;

                debug!(
                    "Transitive swap via {}: {} -> {} -> {}",
                    first.token_b_name,
                    first_leg.amount_in,
                    second_leg.amount_in,
                    second_leg.minimum_amount_out
                );

                Ok(vec![first_leg, second_leg])
            }
            pools => Err(SwapError::InvalidRoute(pools.len())),
        }
    }
}

fn leg(
    pool: &Pool,
    source: &str,
    destination: &str,
    amount_in: u64,
    slippage: f64,
) -> SwapResult<SwapLeg> {
    Ok(SwapLeg {
        pool_account: pool.account.clone(),
        program_id: pool.swap_program_id().to_string(),
        source: source.to_string(),
        destination: destination.to_string(),
        amount_in,
        minimum_amount_out: pool.minimum_amount_out(amount_in, slippage)?,
    })
}
