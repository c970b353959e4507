use crate::core::{CurveType, QuoteSummary};
use crate::pool::{Pool, Route};
use crate::utils::{format_number, from_base_units};
use colored::*;
use console::style;

/// Display helper for quotes
pub struct QuoteDisplay;

impl QuoteDisplay {
    /// Display a forward quote
    pub fn display_summary(summary: &QuoteSummary, route: &Route, slippage_bps: u16) {
        println!("\n{}", style("🏆 Quote").bold().green());
        println!("{} {}", style("►").cyan(), summary.route.join(" → ").bold());

        let input_token = summary.route.first().map(String::as_str).unwrap_or_default();
        let output_token = summary.route.last().map(String::as_str).unwrap_or_default();

        let pools = route.pools();
        let input_decimals = pools.first().and_then(Pool::token_a_decimals);
        let output_decimals = pools.last().and_then(Pool::token_b_decimals);

        println!(
            "  {} {} → {} {}",
            format_amount(summary.amount_in, input_decimals),
            input_token,
            format_amount(summary.amount_out, output_decimals),
            output_token
        );
        println!(
            "  Min Output: {} {} ({}% slippage)",
            format_amount(summary.min_amount_out, output_decimals),
            output_token,
            slippage_bps as f64 / 100.0
        );
        println!("  Price Impact: {}", format_impact(&summary.price_impact.round_dp(4).to_string()));

        for (hop, fee) in summary.liquidity_provider_fees.iter().enumerate() {
            let token = summary.route.get(hop + 1).map(String::as_str).unwrap_or_default();
            println!("  LP Fee (hop {}): {} {}", hop + 1, format_number(*fee), token);
        }

        if let Some(intermediary) = &summary.intermediary {
            println!(
                "  Via {}: {} (min {}){}",
                intermediary.token_name.yellow(),
                format_number(intermediary.estimated_output),
                format_number(intermediary.min_amount_out),
                if intermediary.is_next_hop_stable {
                    " into a stable pool".dimmed().to_string()
                } else {
                    String::new()
                }
            );
        }
        println!();
    }

    /// Display the input a route needs for a minimum output
    pub fn display_required_input(route: &Route, amount_in: u64, minimum_out: u64, slippage_bps: u16) {
        println!("\n{}", style("📥 Required Input").bold().green());

        let pools = route.pools();
        if let (Some(first), Some(last)) = (pools.first(), pools.last()) {
            println!(
                "  {} {} → at least {} {} ({}% slippage)",
                format_amount(amount_in, first.token_a_decimals()),
                first.token_a_name,
                format_amount(minimum_out, last.token_b_decimals()),
                last.token_b_name,
                slippage_bps as f64 / 100.0
            );
        }

        for pool in pools {
            Self::display_pool(pool);
        }
        println!();
    }

    fn display_pool(pool: &Pool) {
        let curve = match &pool.curve_type {
            CurveType::ConstantProduct => "ConstantProduct".blue(),
            CurveType::Stable => "Stable".green(),
            CurveType::Unknown(name) => name.as_str().red(),
        };

        println!(
            "  {} {} {}/{} {}",
            style("►").cyan(),
            curve.bold(),
            pool.token_a_name,
            pool.token_b_name,
            style(&pool.account).dim()
        );
    }
}

/// Human amount with the raw base units alongside.
fn format_amount(amount: u64, decimals: Option<u8>) -> String {
    match decimals {
        Some(decimals) => format!(
            "{} {}",
            from_base_units(amount, decimals),
            style(format!("({})", format_number(amount))).dim()
        ),
        None => format_number(amount),
    }
}

fn format_impact(impact: &str) -> ColoredString {
    let magnitude = impact.trim_start_matches('-').parse::<f64>().unwrap_or_default();
    let text = format!("{}%", impact);
    if magnitude < 1.0 {
        text.green()
    } else if magnitude < 3.0 {
        text.yellow()
    } else {
        text.red()
    }
}
