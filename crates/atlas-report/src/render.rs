//! Text and JSON output for a [`ViewReport`].

use std::io::{self, Write};

use atlas_core::clusters::ClusterAssignment;
use atlas_core::{CountryClusterProfile, ReportPaths, RiskLevel, View, ViewState};
use clap::ValueEnum;
use tracing::error;

use crate::router::{build_report, ClusterProfile, ClusterShare, FigureState, Section, ViewReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    /// One JSON object per view, one per line.
    Json,
}

pub fn render(report: &ViewReport, format: Format, out: &mut impl Write) -> io::Result<()> {
    match format {
        Format::Text => render_text(report, out),
        Format::Json => render_json(report, out),
    }
}

/// Build and render each view in order. Views are independent: one that
/// fails to build is logged and skipped. Returns the views that failed.
pub fn render_views(
    views: &[View],
    country: Option<&str>,
    paths: &ReportPaths,
    format: Format,
    out: &mut impl Write,
) -> io::Result<Vec<View>> {
    let mut failed = Vec::new();
    for &view in views {
        let mut state = ViewState::new(view);
        if let Some(name) = country {
            state = state.with_country(name);
        }

        match build_report(&state, paths) {
            Ok(report) => render(&report, format, out)?,
            Err(e) => {
                error!(view = %view, "{e}");
                failed.push(view);
            }
        }
    }
    Ok(failed)
}

pub fn render_json(report: &ViewReport, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)
}

pub fn render_text(report: &ViewReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "== {} ==", report.title)?;

    if !report.figures.is_empty() {
        writeln!(out)?;
        writeln!(out, "Figures:")?;
        for fig in &report.figures {
            let tag = match fig.state {
                FigureState::Available => "ok",
                FigureState::Missing => "not yet generated",
                FigureState::Withheld => "withheld",
            };
            writeln!(out, "  [{tag}] {}", fig.path.display())?;
        }
    }

    for section in &report.sections {
        writeln!(out)?;
        match section {
            Section::Placeholder { message, .. } => writeln!(out, "{message}")?,
            Section::Projections { rows } => {
                writeln!(out, "Year-by-year projections:")?;
                writeln!(out, "{:<6} {:>14} {:>13} {:>13}", "Year", "Projected (°C)", "95% CI Lower", "95% CI Upper")?;
                for r in rows {
                    writeln!(
                        out,
                        "{:<6} {:>14.3} {:>13.3} {:>13.3}",
                        r.year, r.quadratic_projection, r.quadratic_ci_lower, r.quadratic_ci_upper
                    )?;
                }
            }
            Section::RiskTable { curve, rows } => {
                writeln!(out, "Future risk projections (threshold {:.1}°C):", curve.threshold)?;
                writeln!(out, "{:<6} {:>12} {:>12}  {}", "Year", "Projection", "Probability", "Level")?;
                for r in rows {
                    let marker = if r.level == RiskLevel::HighRisk { " !" } else { "" };
                    writeln!(
                        out,
                        "{:<6} {:>10.3}°C {:>11.1}%  {}{marker}",
                        r.year,
                        r.projection,
                        r.probability * 100.0,
                        r.level
                    )?;
                }
            }
            Section::ClusterOverview {
                total_countries,
                distribution,
                profiles,
            } => write_cluster_overview(out, *total_countries, distribution, profiles)?,
            Section::ClusterAssignments { countries, rows } => write_assignments(out, countries, rows)?,
            Section::CountryLookup {
                profile,
                peers_in_cluster,
                similar,
            } => write_country_lookup(out, profile, *peers_in_cluster, similar)?,
        }
    }

    writeln!(out)
}

fn write_cluster_overview(
    out: &mut impl Write,
    total: usize,
    distribution: &[ClusterShare],
    profiles: &[ClusterProfile],
) -> io::Result<()> {
    writeln!(out, "Cluster distribution ({total} countries):")?;
    for share in distribution {
        writeln!(out, "  {:<28} {:>4} countries {:>6.1}%", share.name, share.count, share.percentage)?;
    }

    for p in profiles {
        let s = &p.summary;
        writeln!(out)?;
        writeln!(out, "### {}", s.name)?;
        writeln!(
            out,
            "Avg Temperature {:.3}°C | Warming Rate {:.3}°C/decade | Recent Average {:.3}°C | Acceleration {:.5}°C/year²",
            s.mean_temp, s.mean_warming_rate_per_decade, s.mean_recent, s.mean_acceleration
        )?;
        writeln!(out, "Description: {}", s.description)?;
        writeln!(out, "Top {} countries by average warming:", p.top_countries.len())?;
        writeln!(out, "  {:<28} {:>10} {:>16} {:>12}", "country", "mean_temp", "warming_rate", "recent_mean")?;
        for c in &p.top_countries {
            writeln!(
                out,
                "  {:<28} {:>8.3}°C {:>9.5}°C/year {:>10.3}°C",
                c.country, c.mean_temp, c.warming_rate, c.recent_mean
            )?;
        }
    }
    Ok(())
}

fn write_assignments(out: &mut impl Write, countries: &[String], rows: &[ClusterAssignment]) -> io::Result<()> {
    writeln!(out, "Cluster assignments ({} countries):", rows.len())?;
    writeln!(out, "  {:<28} {:<5} {}", "country", "iso3", "cluster")?;
    for a in rows {
        writeln!(out, "  {:<28} {:<5} {}", a.country, a.iso3, a.cluster_name)?;
    }
    writeln!(out)?;
    writeln!(out, "Countries available for lookup: {}", countries.join(", "))
}

fn write_country_lookup(
    out: &mut impl Write,
    c: &CountryClusterProfile,
    peers: usize,
    similar: &[String],
) -> io::Result<()> {
    writeln!(out, "### {} ({})", c.country, c.iso3)?;
    writeln!(out, "Cluster: {}", c.cluster_name)?;
    writeln!(out, "Description: {}", c.cluster_description)?;
    writeln!(out, "Warming metrics:")?;
    writeln!(out, "  Average temperature change: {:.3}°C", c.mean_temp)?;
    writeln!(out, "  Warming rate: {:.3}°C/decade", c.warming_rate_per_decade())?;
    writeln!(out, "  Recent average (2010-2022): {:.3}°C", c.recent_mean)?;
    writeln!(out, "  Temperature volatility: {:.3}°C", c.std_temp)?;
    writeln!(out, "Trend analysis:")?;
    writeln!(out, "  Early period (1961-1980): {:.3}°C", c.early_mean)?;
    writeln!(out, "  Change from early to recent: {:.3}°C", c.period_change)?;
    writeln!(out, "  Warming acceleration: {:.5}°C/year²", c.acceleration)?;
    writeln!(out, "Similar countries ({peers} in same cluster):")?;
    for name in similar {
        writeln!(out, "  - {name}")?;
    }
    Ok(())
}
