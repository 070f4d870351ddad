use clap::Args;
use hyresdesk::addresses::{ParsedAddress, PostalDirectory};
use hyresdesk::config::{AppConfig, ResolverConfig};
use hyresdesk::directory::{load_json, Resolution};
use hyresdesk::error::AppError;
use hyresdesk::interests::{annotate, summarize, InterestGroup, ReviewedInterest};
use hyresdesk::{
    AddressParser, ApartmentIndex, ApartmentRecord, EntityResolver, InterestRecord,
    InterestSorter, TenantIndex, TenantRecord,
};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ParseArgs {
    /// Raw address strings to parse
    #[arg(required = true)]
    pub(crate) raw: Vec<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// JSON array of apartment records
    #[arg(long)]
    pub(crate) apartments: PathBuf,
    /// JSON array of tenant records
    #[arg(long)]
    pub(crate) tenants: PathBuf,
    /// Raw address strings to resolve
    #[arg(required = true)]
    pub(crate) raw: Vec<String>,
    /// Never answer the missing-address sentinel with the placeholder tenant
    #[arg(long)]
    pub(crate) no_placeholder: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct InterestsArgs {
    /// JSON array of interest registrations
    #[arg(long)]
    pub(crate) interests: PathBuf,
    /// JSON array of apartment records; enables tenant review columns
    #[arg(long, requires = "tenants")]
    pub(crate) apartments: Option<PathBuf>,
    /// JSON array of tenant records
    #[arg(long, requires = "apartments")]
    pub(crate) tenants: Option<PathBuf>,
    /// `street,postal_code,city` CSV; overrides RESOLVER_POSTAL_CODES
    #[arg(long)]
    pub(crate) postal_codes: Option<PathBuf>,
    /// Print interests grouped by apartment
    #[arg(long)]
    pub(crate) group: bool,
}

pub(crate) fn run_parse(args: ParseArgs) -> Result<(), AppError> {
    let parser = AddressParser::standard();
    let parsed: Vec<(String, Option<ParsedAddress>)> = args
        .raw
        .into_iter()
        .map(|raw| {
            let parsed = parser.parse(&raw);
            (raw, parsed)
        })
        .collect();

    if args.json {
        let payload: Vec<serde_json::Value> = parsed
            .iter()
            .map(|(raw, parsed)| {
                serde_json::json!({
                    "raw": raw,
                    "parsed": parsed,
                    "lookup_key": parsed.as_ref().map(ParsedAddress::lookup_key),
                })
            })
            .collect();
        println!("{}", to_pretty_json(&payload)?);
    } else {
        print!("{}", render_parsed(&parsed));
    }
    Ok(())
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let mut resolver_config = AppConfig::load()?.resolver;
    if args.no_placeholder {
        resolver_config.placeholder_tenant = false;
    }

    let apartments: Vec<ApartmentRecord> = load_json(&args.apartments)?;
    let tenants: Vec<TenantRecord> = load_json(&args.tenants)?;
    let apartments = ApartmentIndex::build(apartments);
    let tenants = TenantIndex::build(tenants);
    let resolver = EntityResolver::from_config(&apartments, &tenants, &resolver_config);

    let resolutions = resolver.resolve_many(&args.raw);
    if args.json {
        println!("{}", to_pretty_json(&resolutions)?);
    } else {
        print!("{}", render_resolutions(&resolutions));
    }
    Ok(())
}

pub(crate) fn run_interests(args: InterestsArgs) -> Result<(), AppError> {
    let resolver_config = AppConfig::load()?.resolver;
    let postal = load_postal_directory(args.postal_codes.as_ref(), &resolver_config)?;

    let interests: Vec<InterestRecord> = load_json(&args.interests)?;
    let sorter = InterestSorter::new().with_postal_directory(&postal);
    let sorted = sorter.sort(interests);

    println!("Interest registrations ({})", sorted.len());
    if args.group {
        print!("{}", render_groups(&sorter.sorted_groups(&sorted)));
    }

    let (Some(apartments_path), Some(tenants_path)) = (args.apartments, args.tenants) else {
        if !args.group {
            print!("{}", render_interests(&sorted));
        }
        return Ok(());
    };

    let apartments: Vec<ApartmentRecord> = load_json(&apartments_path)?;
    let tenants: Vec<TenantRecord> = load_json(&tenants_path)?;
    let apartments = ApartmentIndex::build(apartments);
    let tenants = TenantIndex::build(tenants);
    let resolver = EntityResolver::from_config(&apartments, &tenants, &resolver_config);

    let reviewed = annotate(&sorted, &resolver);
    print!("{}", render_review(&reviewed));

    let summary = summarize(&reviewed);
    println!(
        "\n{} total | {} open | {} matched | {} unknown apartment | {} unparsable | {} without tenant",
        summary.total,
        summary.open,
        summary.matched,
        summary.unmatched_apartment,
        summary.unparsable,
        summary.without_tenant
    );
    Ok(())
}

fn load_postal_directory(
    override_path: Option<&PathBuf>,
    config: &ResolverConfig,
) -> Result<PostalDirectory, AppError> {
    match override_path.or(config.postal_codes.as_ref()) {
        Some(path) => Ok(PostalDirectory::from_path(path)?),
        None => Ok(PostalDirectory::default()),
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn render_parsed(parsed: &[(String, Option<ParsedAddress>)]) -> String {
    let mut out = String::new();
    for (raw, parsed) in parsed {
        match parsed {
            Some(parsed) => {
                writeln!(
                    out,
                    "{raw:?} -> {} [{}] via {}",
                    parsed,
                    parsed.lookup_key(),
                    parsed.matched_by.label()
                )
                .expect("write to string buffer");
                if let Some(city) = &parsed.city {
                    writeln!(out, "  city token: {city}").expect("write to string buffer");
                }
            }
            None => {
                writeln!(out, "{raw:?} -> (no address)").expect("write to string buffer");
            }
        }
    }
    out
}

pub(crate) fn render_resolutions(resolutions: &[Resolution]) -> String {
    let mut out = String::new();
    for resolution in resolutions {
        let key = resolution
            .parsed
            .as_ref()
            .map(|parsed| parsed.lookup_key().to_string())
            .unwrap_or_else(|| "-".to_string());
        let apartment = resolution
            .apartment_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        let tenant = resolution
            .tenant_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:?} | key {key} | apartment {apartment} | tenant {tenant}",
            resolution.raw
        )
        .expect("write to string buffer");
    }
    out
}

pub(crate) fn render_interests(interests: &[InterestRecord]) -> String {
    let mut out = String::new();
    for interest in interests {
        writeln!(
            out,
            "- {} | {} | {} | showing {}",
            interest.id,
            interest.apartment,
            interest.status.label(),
            showing_label(interest)
        )
        .expect("write to string buffer");
    }
    out
}

pub(crate) fn render_groups(groups: &[InterestGroup<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        writeln!(
            out,
            "{} ({} interests)",
            group.display_address,
            group.interests.len()
        )
        .expect("write to string buffer");
        for interest in &group.interests {
            writeln!(
                out,
                "  - {} | {} | showing {}",
                interest.id,
                interest.contact.name,
                showing_label(interest)
            )
            .expect("write to string buffer");
        }
    }
    out
}

pub(crate) fn render_review(reviewed: &[ReviewedInterest<'_>]) -> String {
    let mut out = String::new();
    for entry in reviewed {
        let apartment = entry
            .apartment_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        let tenant = entry
            .tenant
            .as_ref()
            .map(|tenant| format!("{} ({})", tenant.full_name, tenant.phone))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "- {} | {} | apartment {apartment} | current tenant {tenant}",
            entry.interest.id, entry.interest.apartment
        )
        .expect("write to string buffer");
    }
    out
}

fn showing_label(interest: &InterestRecord) -> String {
    interest
        .showing_at
        .map(|showing| showing.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "not booked".to_string())
}
