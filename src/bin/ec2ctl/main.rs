use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ec2ctl::aws::auth::DEFAULT_PROFILE;
use ec2ctl::aws::ec2::{Ec2Client, default_endpoint};
use ec2ctl::ops::{self, Completed, StartOutcome};
use ec2ctl::request::{InstanceRequest, LaunchFlags};
use ec2ctl::{Retrier, RetryPolicy, UsageError};

/// Exit status for an invalid invocation.
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum Action {
    /// Launch a new instance
    Launch,
    /// Start an existing instance
    Start,
}

#[derive(Parser, Debug)]
#[command(name = "ec2ctl", about = "Manage AWS EC2 instances: launch or start an instance")]
struct Cli {
    /// The action to perform: launch or start an instance
    #[arg(value_enum)]
    action: Action,

    /// The AWS region
    region: String,

    /// The id of the instance to start (required for 'start' action)
    #[arg(long = "instance_id")]
    instance_id: Option<String>,

    /// The AMI ID (required for 'launch' action)
    #[arg(long)]
    ami: Option<String>,

    /// The instance type (required for 'launch' action)
    #[arg(long = "instance_type")]
    instance_type: Option<String>,

    /// The subnet ID (required for 'launch' action)
    #[arg(long)]
    subnet: Option<String>,

    /// The security group ID (required for 'launch' action)
    #[arg(long = "security_group")]
    security_group: Option<String>,

    /// Print the request instead of sending it
    #[arg(long = "dry_run")]
    dry_run: bool,

    /// Credentials profile from the shared credentials file
    #[arg(long, default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Retries after the first attempt
    #[arg(long = "max_retries", default_value_t = 5)]
    max_retries: u32,

    /// Base of the exponential wait between attempts, in seconds
    #[arg(long = "backoff_factor", default_value_t = 2)]
    backoff_factor: u64,

    /// Override the regional EC2 endpoint
    #[arg(long = "endpoint_url")]
    endpoint_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "ec2ctl=debug,warn"
    } else {
        "ec2ctl=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let request = match parse_request(&cli) {
        Ok(request) => request,
        Err(usage) => {
            println!("{}", usage);
            return ExitCode::from(EXIT_USAGE);
        }
    };
    let policy = match RetryPolicy::new(cli.max_retries, cli.backoff_factor) {
        Ok(policy) => policy,
        Err(usage) => {
            println!("{}", usage);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let result = if cli.dry_run {
        print_request(&request)
    } else {
        run(&cli, &request, policy)
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Flags that do not belong to the chosen action are ignored.
fn parse_request(cli: &Cli) -> Result<InstanceRequest, UsageError> {
    match cli.action {
        Action::Start => InstanceRequest::start(cli.instance_id.clone()),
        Action::Launch => InstanceRequest::launch(LaunchFlags {
            ami: cli.ami.clone(),
            instance_type: cli.instance_type.clone(),
            subnet: cli.subnet.clone(),
            security_group: cli.security_group.clone(),
        }),
    }
}

fn print_request(request: &InstanceRequest) -> Result<()> {
    let json = match request {
        InstanceRequest::Start { instance_id } => {
            serde_json::json!({ "InstanceIds": [instance_id] })
        }
        InstanceRequest::Launch(spec) => serde_json::to_value(spec)?,
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn run(cli: &Cli, request: &InstanceRequest, policy: RetryPolicy) -> Result<()> {
    let credentials = ec2ctl::aws::load_credentials(&cli.profile)
        .with_context(|| format!("Failed to load credentials for profile '{}'", cli.profile))?;
    let endpoint = cli
        .endpoint_url
        .clone()
        .unwrap_or_else(|| default_endpoint(&cli.region));
    let client = Ec2Client::with_endpoint(&cli.region, &endpoint, credentials)?;
    let retrier = Retrier::new(policy);

    match ops::execute(&client, &retrier, request)? {
        Completed::Launch(instance_id) => println!("{}", instance_id),
        Completed::Start(StartOutcome::Started | StartOutcome::AlreadyRunning) => {}
    }
    Ok(())
}
