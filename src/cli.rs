// SPDX-License-Identifier: MIT
//
// Command-line front end over chromatone-theme.
//
// Every subcommand follows the same shape: load the saved configuration
// from the store directory, apply any flags on top field by field, run the
// engine, print. Output goes to the writer handed to `run` so tests can
// capture it; logs go to stderr through tracing.

use std::io::Write;
use std::path::PathBuf;

use chromatone_color::{Hsl, parse_any};
use chromatone_theme::builtin::{builtin_config, builtin_names};
use chromatone_theme::contrast::Threshold;
use chromatone_theme::export::PaletteEntry;
use chromatone_theme::store::{clear_configuration, load_configuration, save_configuration};
use chromatone_theme::{
    FileStore, HarmonyRule, Mode, ResolvedTheme, ThemeConfiguration, ThemeDescription, ValidationReport,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::error::{AppError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "chromatone",
    about = "Color-harmony palettes with WCAG contrast-resolved UI roles",
    version
)]
pub struct Cli {
    /// Directory holding the saved configuration.
    #[arg(long, global = true, env = "CHROMATONE_STORE", default_value = ".chromatone")]
    pub store: PathBuf,

    /// Log engine decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the harmony palette for a base color.
    Palette(PaletteArgs),

    /// Resolve the saved configuration (plus overrides) into a theme.
    Theme(ThemeArgs),

    /// Check the saved configuration against its contrast threshold.
    Validate(ValidateArgs),

    /// Print the saved configuration.
    Show,

    /// Remove the saved configuration.
    Reset,

    /// List built-in presets.
    Presets,

    /// Resolve a built-in preset.
    Preset(PresetArgs),
}

#[derive(Debug, Args)]
pub struct PaletteArgs {
    /// Base color: `hsl(210, 50%, 50%)`, `210,50,50`, `#4080bf` or `rgb(64, 128, 191)`.
    #[arg(long, value_parser = parse_any)]
    pub base: Hsl,

    #[arg(long)]
    pub rule: HarmonyRule,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Field-by-field overrides on top of the saved configuration.
#[derive(Debug, Default, Args)]
pub struct ConfigOverrides {
    /// Base color: `hsl(210, 50%, 50%)`, `210,50,50`, `#4080bf` or `rgb(64, 128, 191)`.
    #[arg(long, value_parser = parse_any)]
    pub base: Option<Hsl>,

    #[arg(long)]
    pub rule: Option<HarmonyRule>,

    /// AA, AAA or a ratio such as 5.5.
    #[arg(long)]
    pub threshold: Option<Threshold>,

    /// Force pure black or white primary text.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub force_bw: Option<bool>,

    /// Validate every palette pair instead of the role pairs.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub mix_and_match: Option<bool>,

    /// Saturation scale in percent (100 keeps the base saturation).
    #[arg(long)]
    pub saturation: Option<u16>,

    /// Degrees to rotate the base hue.
    #[arg(long, allow_negative_numbers = true)]
    pub hue_offset: Option<i32>,

    /// Use the large-text WCAG targets.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub large_text: Option<bool>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ThemeConfiguration) {
        if let Some(base) = self.base {
            config.base_color = Some(base);
        }
        if let Some(rule) = self.rule {
            config.harmony_rule = Some(rule);
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(force) = self.force_bw {
            config.force_black_white_text = force;
        }
        if let Some(mix) = self.mix_and_match {
            config.mix_and_match = mix;
        }
        if let Some(saturation) = self.saturation {
            config.saturation = saturation;
        }
        if let Some(offset) = self.hue_offset {
            config.hue_offset = offset;
        }
        if let Some(large) = self.large_text {
            config.large_text = large;
        }
    }
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[arg(long, default_value = "light")]
    pub mode: Mode,

    /// Print the theme description JSON.
    #[arg(long, conflicts_with = "css")]
    pub json: bool,

    /// Print the roles as CSS custom properties.
    #[arg(long)]
    pub css: bool,

    /// Save the configuration after applying overrides.
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[arg(long, default_value = "light")]
    pub mode: Mode,

    /// Report failures but exit successfully.
    #[arg(long)]
    pub allow_failures: bool,
}

#[derive(Debug, Args)]
pub struct PresetArgs {
    pub name: String,

    #[arg(long, default_value = "light")]
    pub mode: Mode,

    /// Print the theme description JSON.
    #[arg(long)]
    pub json: bool,

    /// Save the preset as the current configuration.
    #[arg(long)]
    pub save: bool,
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let mut store = FileStore::new(&cli.store);
    debug!(store = %cli.store.display(), "using store");
    match cli.command {
        Commands::Palette(args) => run_palette(&args, out),
        Commands::Theme(args) => run_theme(&args, &mut store, out),
        Commands::Validate(args) => run_validate(&args, &store, out),
        Commands::Show => {
            let config = load_configuration(&store);
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            Ok(())
        }
        Commands::Reset => {
            clear_configuration(&mut store)?;
            writeln!(out, "configuration cleared")?;
            Ok(())
        }
        Commands::Presets => print_presets(out),
        Commands::Preset(args) => run_preset(&args, &mut store, out),
    }
}

fn run_palette(args: &PaletteArgs, out: &mut impl Write) -> Result<()> {
    let palette = args.rule.generate(args.base);
    if args.json {
        let entries: Vec<PaletteEntry> = palette.into_iter().map(PaletteEntry::from).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }
    for (i, color) in palette.iter().enumerate() {
        writeln!(out, "color-{}  {:<20}  {}", i + 1, color.to_string(), color.to_rgb().to_hex())?;
    }
    Ok(())
}

fn run_theme(args: &ThemeArgs, store: &mut FileStore, out: &mut impl Write) -> Result<()> {
    let mut config = load_configuration(store);
    args.overrides.apply(&mut config);
    let theme = resolve(&config, args.mode)?;

    if args.json {
        writeln!(out, "{}", ThemeDescription::new(&config, &theme).to_json()?)?;
    } else if args.css {
        write!(out, "{}", ThemeDescription::new(&config, &theme).to_css_variables())?;
    } else {
        print_theme(out, &config, &theme)?;
    }

    if args.save {
        save_configuration(store, &config)?;
        debug!("configuration saved");
    }
    Ok(())
}

fn run_validate(args: &ValidateArgs, store: &FileStore, out: &mut impl Write) -> Result<()> {
    let mut config = load_configuration(store);
    args.overrides.apply(&mut config);
    let theme = resolve(&config, args.mode)?;
    print_report(out, &config, &theme.validation)?;

    let report = &theme.validation;
    if !report.is_valid && !args.allow_failures {
        return Err(AppError::ValidationFailed {
            failed: report.failed_pairs.len(),
            total: report.all_pairs.len(),
            threshold: theme.threshold,
        });
    }
    Ok(())
}

fn run_preset(args: &PresetArgs, store: &mut FileStore, out: &mut impl Write) -> Result<()> {
    let config = builtin_config(&args.name).ok_or_else(|| AppError::UnknownPreset {
        name: args.name.clone(),
    })?;
    let theme = resolve(&config, args.mode)?;
    if args.json {
        writeln!(out, "{}", ThemeDescription::new(&config, &theme).to_json()?)?;
    } else {
        print_theme(out, &config, &theme)?;
    }
    if args.save {
        save_configuration(store, &config)?;
    }
    Ok(())
}

fn resolve(config: &ThemeConfiguration, mode: Mode) -> Result<ResolvedTheme> {
    if config.base_color.is_none() {
        return Err(AppError::Incomplete {
            missing: "base color",
            flag: "base",
        });
    }
    ResolvedTheme::resolve(config, mode).ok_or(AppError::Incomplete {
        missing: "harmony rule",
        flag: "rule",
    })
}

// ─── Output ──────────────────────────────────────────────────────────────────

fn print_theme(out: &mut impl Write, config: &ThemeConfiguration, theme: &ResolvedTheme) -> Result<()> {
    writeln!(
        out,
        "{} from {}, {} mode, target {:.2}:1",
        theme.rule, theme.base, theme.mode, theme.threshold
    )?;

    writeln!(out, "\npalette")?;
    for (i, color) in theme.palette.iter().enumerate() {
        writeln!(out, "  color-{}              {:<20}  {}", i + 1, color.to_string(), color.to_rgb().to_hex())?;
    }

    writeln!(out, "\nroles")?;
    for (role, color) in theme.roles.iter() {
        let rgb = color.to_rgb();
        writeln!(
            out,
            "  {:<20}  {:<20}  {}  {}",
            role.name(),
            color.to_string(),
            rgb.to_hex(),
            rgb.to_channels()
        )?;
    }

    writeln!(out)?;
    print_report(out, config, &theme.validation)
}

fn print_report(out: &mut impl Write, config: &ThemeConfiguration, report: &ValidationReport) -> Result<()> {
    let scope = if config.mix_and_match { "palette pairs" } else { "role pairs" };
    if report.is_valid {
        writeln!(out, "validation: all {} {scope} pass", report.all_pairs.len())?;
    } else {
        writeln!(
            out,
            "validation: {} of {} {scope} fail",
            report.failed_pairs.len(),
            report.all_pairs.len()
        )?;
    }
    for check in &report.all_pairs {
        let status = if check.passes() { "pass" } else { "FAIL" };
        let pair = format!("{} on {}", check.foreground, check.background);
        writeln!(
            out,
            "  {status}  {pair:<42}  {:>6.2}:1  {}",
            check.ratio,
            check.grade()
        )?;
    }
    if !report.is_valid {
        write!(out, "\n{}", report.summary())?;
    }
    Ok(())
}

fn print_presets(out: &mut impl Write) -> Result<()> {
    for name in builtin_names() {
        let Some(config) = builtin_config(name) else {
            continue;
        };
        let rule = config.harmony_rule.map_or("-", HarmonyRule::name);
        let base = config.base_color.map(|c| c.to_string()).unwrap_or_default();
        writeln!(out, "{name:<8}  {rule:<20}  {base:<20}  {}", config.threshold)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_args(store: &std::path::Path, args: &[&str]) -> (Result<()>, String) {
        let mut argv = vec!["chromatone", "--store", store.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let result = run(cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn palette_prints_one_line_per_color() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(dir.path(), &["palette", "--base", "210,50,50", "--rule", "triadic"]);
        assert!(result.is_ok());
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("color-1  hsl(210, 50%, 50%)"), "{out}");
        assert!(out.contains("#4080bf"));
    }

    #[test]
    fn palette_json_has_triples() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(dir.path(), &["palette", "--base", "#4080bf", "--rule", "complementary", "--json"]);
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["hex"], "#4080bf");
    }

    #[test]
    fn bad_rule_is_a_parse_error() {
        let result = Cli::try_parse_from(["chromatone", "palette", "--base", "1,2,3", "--rule", "pentagram"]);
        assert!(result.is_err());
    }

    #[test]
    fn theme_without_configuration_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let (result, _) = run_args(dir.path(), &["theme"]);
        assert!(matches!(result, Err(AppError::Incomplete { flag: "base", .. })));
        let (result, _) = run_args(dir.path(), &["theme", "--base", "1,2,3"]);
        assert!(matches!(result, Err(AppError::Incomplete { flag: "rule", .. })));
    }

    #[test]
    fn theme_save_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(
            dir.path(),
            &["theme", "--base", "210,50,50", "--rule", "monochromatic", "--threshold", "AAA", "--mode", "dark", "--save"],
        );
        assert!(result.is_ok());
        assert!(out.starts_with("monochromatic from hsl(210, 50%, 50%), dark mode, target 7.00:1"), "{out}");
        assert!(out.contains("validation: all 2 role pairs pass"), "{out}");

        let (_, shown) = run_args(dir.path(), &["show"]);
        let saved: ThemeConfiguration = serde_json::from_str(&shown).unwrap();
        assert_eq!(saved.base_color, Some(Hsl::new(210, 50, 50)));
        assert_eq!(saved.threshold, Threshold::AAA);

        // Later runs pick the saved fields up without flags.
        let (result, out) = run_args(dir.path(), &["theme", "--mode", "dark"]);
        assert!(result.is_ok());
        assert!(out.starts_with("monochromatic"));
    }

    #[test]
    fn theme_json_is_description() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(dir.path(), &["theme", "--base", "200,60,45", "--rule", "square", "--json"]);
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["harmonyRule"], "square");
        assert_eq!(json["mode"], "light");
        assert_eq!(json["palette"].as_array().unwrap().len(), 4);
        assert!(json["roles"]["accent-glow"].is_string());
    }

    #[test]
    fn theme_css_lists_roles() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(dir.path(), &["theme", "--base", "30,80,60", "--rule", "complementary", "--css"]);
        assert!(result.is_ok());
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn negative_hue_offset_parses() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(
            dir.path(),
            &["theme", "--base", "0,50,50", "--rule", "monochromatic", "--hue-offset", "-90", "--json"],
        );
        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["baseColor"]["h"], 0);
        assert_eq!(json["hueOffset"], -90);
        assert_eq!(json["palette"][0]["hsl"]["h"], 270);
    }

    #[test]
    fn validate_fails_with_exit_two() {
        let dir = tempfile::tempdir().unwrap();
        let args = ["validate", "--base", "0,0,50", "--rule", "monochromatic", "--threshold", "21", "--mode", "dark"];
        let (result, out) = run_args(dir.path(), &args);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(out.contains("FAIL"), "{out}");
        assert!(out.contains("text-primary on background-primary: "), "{out}");

        let mut bypass = args.to_vec();
        bypass.push("--allow-failures");
        let (result, _) = run_args(dir.path(), &bypass);
        assert!(result.is_ok());
    }

    #[test]
    fn validate_mix_and_match_checks_six_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(
            dir.path(),
            &["validate", "--base", "0,50,50", "--rule", "triadic", "--mix-and-match", "--allow-failures"],
        );
        assert!(result.is_ok());
        assert!(out.contains("of 6 palette pairs fail"), "{out}");
    }

    #[test]
    fn preset_save_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(dir.path(), &["preset", "ocean", "--save"]);
        assert!(result.is_ok());
        assert!(out.starts_with("analogous"), "{out}");

        let (_, shown) = run_args(dir.path(), &["show"]);
        assert!(shown.contains("\"analogous\""), "{shown}");

        let (result, out) = run_args(dir.path(), &["reset"]);
        assert!(result.is_ok());
        assert_eq!(out, "configuration cleared\n");
        let (_, shown) = run_args(dir.path(), &["show"]);
        let config: ThemeConfiguration = serde_json::from_str(&shown).unwrap();
        assert_eq!(config, ThemeConfiguration::default());
    }

    #[test]
    fn unknown_preset_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (result, _) = run_args(dir.path(), &["preset", "neon"]);
        assert!(matches!(result, Err(AppError::UnknownPreset { .. })));
    }

    #[test]
    fn presets_lists_every_name() {
        let dir = tempfile::tempdir().unwrap();
        let (result, out) = run_args(dir.path(), &["presets"]);
        assert!(result.is_ok());
        assert_eq!(out.lines().count(), builtin_names().len());
        assert!(out.contains("ember"));
    }
}
