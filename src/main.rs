use android_adb_unlock::adb::AdbBackend;
use android_adb_unlock::args::{self, Args, Command};
use android_adb_unlock::device::AdbProbe;
use android_adb_unlock::unlock::{UnlockError, Unlocker};
use std::env;
use std::process::ExitCode;

const EXIT_USAGE: u8 = 1;
const EXIT_INVALID_CREDENTIAL: u8 = 2;
const EXIT_UNLOCK_FAILED: u8 = 3;

fn main() -> ExitCode {
    let command = match Args::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("❌ {e}");
            args::print_help();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let args = match command {
        Command::Help => {
            args::print_help();
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("Android ADB Unlock {}", env!("APP_VERSION_DISPLAY"));
            return ExitCode::SUCCESS;
        }
        Command::Run(args) => args,
    };

    let default_filter = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("❌ Failed to start runtime: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    rt.block_on(run(args))
}

async fn run(args: Args) -> ExitCode {
    let use_rust = args.adb_impl.use_rust();
    let connected = match &args.device {
        Some(name) => AdbBackend::new_with_device(name, use_rust).await,
        None => AdbBackend::connect_first(use_rust).await,
    };
    let client = match connected {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ ADB connection failed: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    let (sx, sy) = client.screen_dimensions();
    log::info!(
        "📱 Device: {} size: {}x{} (backend={}, transport={:?})",
        client.device_name(),
        sx,
        sy,
        client.impl_str(),
        client.transport_id()
    );

    let unlocker = match Unlocker::detect(AdbProbe::new(client), args.unlock_config()).await {
        Ok(unlocker) => unlocker,
        Err(e) => {
            log::error!("❌ Variant detection failed: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match unlocker.open_lock(&args.credential).await {
        Ok(outcome) => {
            log::info!("✅ Done: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &UnlockError) -> u8 {
    match err {
        UnlockError::InvalidCredential { .. }
        | UnlockError::InvalidPatternCell { .. }
        | UnlockError::InvalidPatternSize { .. } => EXIT_INVALID_CREDENTIAL,
        UnlockError::Terminal { .. } => {
            log::warn!("🛑 Stopping automation");
            EXIT_UNLOCK_FAILED
        }
        UnlockError::Probe(e) => {
            if e.is_disconnect() {
                log::warn!("🔌 Device link lost, check the cable or 'adb devices'");
            }
            EXIT_USAGE
        }
    }
}
