use crate::core::{Config, SwapResult};
use crate::pool::Route;
use log::{info, warn};

/// Picks the best of the candidate routes a caller already assembled.
pub struct RouteSelector {
    prefers_direct_swap: bool,
}

impl RouteSelector {
    pub fn new(prefers_direct_swap: bool) -> Self {
        Self {
            prefers_direct_swap,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.prefers_direct_swap)
    }

    /// Route paying out the most for `input_amount`.
    ///
    /// Routes that fail to quote, or quote zero, are dropped. When direct
    /// swaps are preferred, the best direct route wins over any transitive one.
    pub fn best_route_for_input_amount<'a>(
        &self,
        input_amount: u64,
        routes: &'a [Route],
    ) -> Option<&'a Route> {
        let mut quoted: Vec<(&Route, u64)> = routes
            .iter()
            .map(|route| (route, Self::quote_or_zero(route.output_amount(input_amount), route)))
            .filter(|(_, output)| *output > 0)
            .collect();

        quoted.sort_by(|(_, a), (_, b)| b.cmp(a));

        info!(
            "{} of {} routes quote a non-zero output for input {}",
            quoted.len(),
            routes.len(),
            input_amount
        );

        self.pick(quoted.into_iter().map(|(route, _)| route).collect())
    }

    /// Route needing the least input to deliver `estimated_output`.
    pub fn best_route_for_estimated_amount<'a>(
        &self,
        estimated_output: u64,
        routes: &'a [Route],
    ) -> Option<&'a Route> {
        let mut quoted: Vec<(&Route, u64)> = routes
            .iter()
            .map(|route| {
                (
                    route,
                    Self::quote_or_zero(route.input_amount(estimated_output), route),
                )
            })
            .filter(|(_, input)| *input > 0)
            .collect();

        quoted.sort_by(|(_, a), (_, b)| a.cmp(b));

        info!(
            "{} of {} routes quote a non-zero input for output {}",
            quoted.len(),
            routes.len(),
            estimated_output
        );

        self.pick(quoted.into_iter().map(|(route, _)| route).collect())
    }

    fn pick<'a>(&self, ranked: Vec<&'a Route>) -> Option<&'a Route> {
        if self.prefers_direct_swap {
            if let Some(direct) = ranked.iter().find(|route| route.is_direct()) {
                return Some(*direct);
            }
        }
        ranked.first().copied()
    }

    fn quote_or_zero(quote: SwapResult<u64>, route: &Route) -> u64 {
        match quote {
            Ok(amount) => amount,
            Err(e) => {
                let pools: Vec<&str> = route.pools().iter().map(|p| p.account.as_str()).collect();
                warn!("Failed to quote route {:?}: {}", pools, e);
                0
            }
        }
    }
}

impl Default for RouteSelector {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
