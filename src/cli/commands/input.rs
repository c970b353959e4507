use crate::cli::{commands::load_routes, display::QuoteDisplay, InputArgs};
use crate::core::{Config, SwapError, SwapResult};
use crate::pool::Route;
use crate::selection::RouteSelector;
use colored::*;
use log::info;

pub async fn execute(args: InputArgs, config: &Config) -> SwapResult<()> {
    println!("{}", "🚀 Pool Quote Tool".bold().cyan());

    let slippage_bps = args.slippage.unwrap_or(config.default_slippage_bps);
    let slippage = config.slippage_fraction(slippage_bps)?;

    let routes = load_routes(config, &args.source, &args.routes).await?;

    info!(
        "Finding input for minimum out {} across {} candidate routes (slippage: {} bps)",
        args.minimum_out,
        routes.len(),
        slippage_bps
    );

    let selector = RouteSelector::from_config(config);
    let (route, amount_in) = cheapest_input(&selector, &routes, args.minimum_out, slippage)?;
    QuoteDisplay::display_required_input(route, amount_in, args.minimum_out, slippage_bps);

    Ok(())
}

/// Pick the candidate needing the least input for `minimum_out` and price it.
pub fn cheapest_input<'a>(
    selector: &RouteSelector,
    routes: &'a [Route],
    minimum_out: u64,
    slippage: f64,
) -> SwapResult<(&'a Route, u64)> {
    let route = selector
        .best_route_for_estimated_amount(minimum_out, routes)
        .ok_or(SwapError::NoQuotableRoute)?;

    Ok((route, route.input_amount_for(minimum_out, slippage)?))
}
