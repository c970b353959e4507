use crate::cli::{commands::load_routes, display::QuoteDisplay, QuoteArgs};
use crate::core::{Config, QuoteSummary, SwapError, SwapResult};
use crate::pool::Route;
use crate::selection::RouteSelector;
use crate::utils::to_base_units;
use colored::*;
use log::info;

pub async fn execute(args: QuoteArgs, config: &Config) -> SwapResult<()> {
    println!("{}", "🚀 Pool Quote Tool".bold().cyan());

    let slippage_bps = args.slippage.unwrap_or(config.default_slippage_bps);
    let slippage = config.slippage_fraction(slippage_bps)?;

    let routes = load_routes(config, &args.source, &args.routes).await?;

    info!(
        "Quoting {} across {} candidate routes (slippage: {} bps)",
        args.amount,
        routes.len(),
        slippage_bps
    );

    let selector = RouteSelector::from_config(config);
    let (route, summary) = best_quote(&selector, &routes, args.amount, slippage)?;
    QuoteDisplay::display_summary(&summary, route, slippage_bps);

    Ok(())
}

/// Pick the best paying candidate for a human `amount` and summarize it.
pub fn best_quote<'a>(
    selector: &RouteSelector,
    routes: &'a [Route],
    amount: f64,
    slippage: f64,
) -> SwapResult<(&'a Route, QuoteSummary)> {
    let decimals = routes
        .first()
        .and_then(|route| route.pools()[0].token_a_decimals())
        .ok_or(SwapError::BalancesUnavailable)?;
    let amount_in = to_base_units(amount, decimals)?;

    let route = selector
        .best_route_for_input_amount(amount_in, routes)
        .ok_or(SwapError::NoQuotableRoute)?;

    Ok((route, summarize(route, amount, slippage)?))
}

/// Compute everything shown for a forward quote of a human `amount`.
pub fn summarize(route: &Route, amount: f64, slippage: f64) -> SwapResult<QuoteSummary> {
    let first = &route.pools()[0];
    let decimals = first
        .token_a_decimals()
        .ok_or(SwapError::BalancesUnavailable)?;
    let amount_in = to_base_units(amount, decimals)?;

    let amount_out = route.output_amount(amount_in)?;

    let mut tokens = vec![first.token_a_name.clone()];
    tokens.extend(route.pools().iter().map(|pool| pool.token_b_name.clone()));

    Ok(QuoteSummary {
        route: tokens,
        amount_in,
        amount_out,
        min_amount_out: route.minimum_amount_out(amount_in, slippage)?,
        liquidity_provider_fees: route.liquidity_provider_fees(amount, slippage)?,
        price_impact: route.price_impact_percent(amount_in, amount_out)?,
        intermediary: route.intermediary_token(amount_in, slippage)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::fixtures::constant_product_pool;
    use pretty_assertions::assert_eq;

    fn transitive() -> Route {
        Route::new(vec![
            constant_product_pool("USDC", "SOL", 1_000_000, 2_000_000, (25, 10_000), (0, 0)),
            constant_product_pool("SOL", "ETH", 2_000_000, 500_000, (25, 10_000), (5, 10_000)),
        ])
        .unwrap()
    }

    // Shallower than the transitive path, so it pays less.
    fn direct() -> Route {
        Route::new(vec![constant_product_pool(
            "USDC",
            "ETH",
            100_000,
            50_000,
            (30, 10_000),
            (0, 0),
        )])
        .unwrap()
    }

    #[test]
    fn test_summarize_transitive_route() {
        let summary = summarize(&transitive(), 0.01, 0.01).unwrap();

        assert_eq!(summary.route, vec!["USDC", "SOL", "ETH"]);
        assert_eq!(summary.amount_in, 10_000);
        assert_eq!(summary.amount_out, 4_875);
        assert_eq!(summary.min_amount_out, 4_826);
        assert_eq!(summary.liquidity_provider_fees, vec![49, 14]);
        assert_eq!(summary.intermediary.unwrap().token_name, "SOL");
    }

    #[test]
    fn test_best_quote_follows_direct_swap_preference() {
        let routes = vec![transitive(), direct()];

        let (route, summary) = best_quote(&RouteSelector::new(false), &routes, 0.01, 0.01).unwrap();
        assert_eq!(route, &routes[0]);
        assert_eq!(summary.amount_out, 4_875);

        let (route, summary) = best_quote(&RouteSelector::new(true), &routes, 0.01, 0.01).unwrap();
        assert_eq!(route, &routes[1]);
        assert_eq!(summary.route, vec!["USDC", "ETH"]);
        assert!(summary.amount_out < 4_875);
    }

    #[test]
    fn test_best_quote_without_candidates() {
        assert!(matches!(
            best_quote(&RouteSelector::default(), &[], 0.01, 0.01),
            Err(SwapError::BalancesUnavailable)
        ));
        assert!(matches!(
            best_quote(&RouteSelector::default(), &[direct()], 0.0, 0.01),
            Err(SwapError::NoQuotableRoute)
        ));
    }
}
