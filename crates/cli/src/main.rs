use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dental::{find_by_fdi, teeth, DentalPiece, DentalSurface, Dentition};
use hl7_core::config::encoder_config_from_env_values;
use hl7_core::constants::{PARAM_MAX_LENGTH_ENV, PARAM_SLOTS_ENV};
use hl7_core::{
    validate_dental_combination, BenefitItem, BenefitRequestMapper, Hl7Result,
    MedicalBenefitItem,
};
use hl7_wire::{classify_cancellation, classify_eligibility, classify_registration};

#[derive(Parser)]
#[command(name = "hl7")]
#[command(about = "HL7 benefit encoding and response classification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode benefits into param1/param2/param3
    Encode {
        /// Medical benefit as QTY:CODE (repeatable)
        #[arg(long = "medical", value_name = "QTY:CODE")]
        medical: Vec<String>,
        /// Dental benefit as FDI:SURFACES:CODE (FDI and SURFACES may be empty)
        #[arg(long = "dental", value_name = "FDI:SURFACES:CODE")]
        dental: Vec<String>,
        /// Print the parameters as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a dental piece/surfaces combination
    ValidateDental {
        /// FDI tooth number (11-48)
        #[arg(long)]
        piece: Option<u8>,
        /// Surface letters, e.g. "OM"
        #[arg(long, default_value = "")]
        surfaces: String,
    },
    /// List the FDI tooth catalog
    Teeth {
        /// List temporary (deciduous) teeth instead of permanent ones
        #[arg(long)]
        temporary: bool,
    },
    /// Classify a raw HL7 response
    Classify {
        /// Which call produced the response
        #[arg(long, value_enum)]
        kind: CallKind,
        /// HTTP status code
        #[arg(long, default_value_t = 200)]
        status: u16,
        /// File holding the response body
        #[arg(long)]
        body: PathBuf,
        /// Operation name used in the report title
        #[arg(long, default_value = "HL7 request")]
        context: String,
        /// Transaction number appended to the report
        #[arg(long)]
        transaction: Option<String>,
        /// Print the classified result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CallKind {
    Registration,
    Cancellation,
    Eligibility,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hl7=info".parse()?)
                .add_directive("dental=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = encoder_config_from_env_values(
        std::env::var(PARAM_MAX_LENGTH_ENV).ok(),
        std::env::var(PARAM_SLOTS_ENV).ok(),
    )
    .context("invalid encoder configuration")?;
    tracing::debug!(?config, "resolved encoder configuration");

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            medical,
            dental,
            json,
        } => {
            let mut benefits = Vec::new();
            for raw in &medical {
                benefits.push(parse_medical_arg(raw)?);
            }
            for raw in &dental {
                benefits.push(parse_dental_arg(raw)?);
            }

            let params = BenefitRequestMapper::new(config).apply(&benefits)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&params)?);
            } else {
                println!("param1: {}", params.param1);
                println!("param2: {}", params.param2);
                println!("param3: {}", params.param3);
            }
        }
        Commands::ValidateDental { piece, surfaces } => {
            let piece = piece.map(DentalPiece::from_fdi).transpose()?;
            let surfaces = DentalSurface::from_codes(&surfaces)?;
            let result = validate_dental_combination(piece, &surfaces);
            println!("{}", result.message());
            if !result.is_valid() {
                bail!("invalid dental combination");
            }
        }
        Commands::Teeth { temporary } => {
            let dentition = if temporary {
                Dentition::Temporary
            } else {
                Dentition::Permanent
            };
            for tooth in teeth(dentition) {
                println!("{tooth}");
            }
        }
        Commands::Classify {
            kind,
            status,
            body,
            context,
            transaction,
            json,
        } => {
            let text = std::fs::read_to_string(&body)
                .with_context(|| format!("failed to read {}", body.display()))?;
            let transaction = transaction.as_deref();
            match kind {
                CallKind::Registration => print_outcome(
                    &classify_registration(status, &text),
                    &context,
                    transaction,
                    json,
                )?,
                CallKind::Cancellation => print_outcome(
                    &classify_cancellation(status, &text),
                    &context,
                    transaction,
                    json,
                )?,
                CallKind::Eligibility => print_outcome(
                    &classify_eligibility(status, &text),
                    &context,
                    transaction,
                    json,
                )?,
            }
        }
    }

    Ok(())
}

fn print_outcome<T: serde::Serialize>(
    result: &Hl7Result<T>,
    context: &str,
    transaction: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("status: {}", result.status());
    if let Some(report) = result.report(context, transaction) {
        println!("{}", report.title);
        println!("{}", report.message);
    }
    Ok(())
}

/// `QTY:CODE`, e.g. `2:660001`.
fn parse_medical_arg(raw: &str) -> anyhow::Result<BenefitItem> {
    let Some((quantity, code)) = raw.split_once(':') else {
        bail!("medical benefit '{raw}' must look like QTY:CODE");
    };
    let quantity: u32 = quantity
        .trim()
        .parse()
        .with_context(|| format!("invalid quantity in '{raw}'"))?;
    Ok(MedicalBenefitItem::of(quantity, code.trim())?.into())
}

/// `FDI:SURFACES:CODE`, e.g. `26:OM:020801` or `::020801` for a general benefit.
fn parse_dental_arg(raw: &str) -> anyhow::Result<BenefitItem> {
    let parts: Vec<&str> = raw.splitn(3, ':').collect();
    let [fdi, surfaces, code] = parts.as_slice() else {
        bail!("dental benefit '{raw}' must look like FDI:SURFACES:CODE");
    };

    let fdi = match fdi.trim() {
        "" => None,
        text => {
            let fdi: u8 = text
                .parse()
                .with_context(|| format!("invalid FDI number in '{raw}'"))?;
            if find_by_fdi(fdi).is_some_and(|tooth| tooth.piece().is_none()) {
                bail!("tooth {fdi} is a temporary tooth; only permanent teeth can be billed");
            }
            Some(fdi)
        }
    };

    Ok(BenefitItem::dental(fdi, surfaces, code.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn prints_classified_outcomes() {
        let result = classify_registration(200, r#"{"cabecera": {"rechaCabecera": 5}}"#);
        print_outcome(&result, "registration", Some("1"), true).expect("json output");
        print_outcome(&result, "registration", None, false).expect("text output");
    }

    #[test]
    fn parses_medical_argument() {
        let item = parse_medical_arg("2:660001").expect("valid argument");
        assert_eq!(item.value(), "2^*660001*2**");
        assert!(parse_medical_arg("2-660001").is_err());
        assert!(parse_medical_arg("x:660001").is_err());
        assert!(parse_medical_arg("0:660001").is_err());
    }

    #[test]
    fn parses_dental_argument() {
        let item = parse_dental_arg("26:MO:020801").expect("valid argument");
        assert_eq!(item.value(), "1^*26*OM*O020801*P*1**");

        let general = parse_dental_arg("::020801").expect("valid argument");
        assert_eq!(general.value(), "1^***O020801*P*1**");

        assert!(parse_dental_arg("26:OM").is_err());
        assert!(parse_dental_arg("55:O:020801").is_err());
        assert!(parse_dental_arg("11:O:020801").is_err());
    }
}
