// crates/trustnet-cli/src/commands/wallet.rs
//
// Account key management: create, import, export.
//
// The secp256k1 secret is stored hex-encoded at ~/.trustnet/keys/account.key
// next to its address in account.address.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use trustnet_core::crypto::Keypair;

const SECRET_FILE: &str = "account.key";
const ADDRESS_FILE: &str = "account.address";

#[derive(Debug, Subcommand)]
pub enum WalletCmd {
    /// Generate a new account key.
    Create {
        /// Overwrite an existing key.
        #[arg(long)]
        force: bool,
    },
    /// Import an account key from a hex secret.
    Import {
        /// Hex-encoded 32-byte secret, optionally `0x`-prefixed.
        #[arg(long)]
        secret: String,
        #[arg(long)]
        force: bool,
    },
    /// Print the stored address, and the secret with `--secret`.
    Export {
        #[arg(long)]
        secret: bool,
    },
}

pub fn run(cmd: &WalletCmd) -> Result<(), Box<dyn std::error::Error>> {
    let keys_dir = get_keys_dir()?;
    match cmd {
        WalletCmd::Create { force } => {
            let keypair = Keypair::generate();
            save_keypair(&keys_dir, &keypair, *force)?;
            println!("Account created");
            println!("  Address: {}", keypair.address());
            println!("  Keys:    {}", keys_dir.display());
        }
        WalletCmd::Import { secret, force } => {
            let keypair = Keypair::from_secret_hex(secret)?;
            save_keypair(&keys_dir, &keypair, *force)?;
            println!("Account imported");
            println!("  Address: {}", keypair.address());
        }
        WalletCmd::Export { secret } => {
            let keypair = load_keypair_from(&keys_dir)?;
            println!("Address: {}", keypair.address());
            if *secret {
                println!("Secret:  0x{}", keypair.secret_hex());
            }
        }
    }
    Ok(())
}

/// Get the keys directory path (~/.trustnet/keys/).
pub fn get_keys_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("Could not determine home directory")?;
    Ok(home.join(".trustnet").join("keys"))
}

/// Load the stored account key.
pub fn load_keypair() -> Result<Keypair, Box<dyn std::error::Error>> {
    load_keypair_from(&get_keys_dir()?)
}

fn load_keypair_from(keys_dir: &Path) -> Result<Keypair, Box<dyn std::error::Error>> {
    let path = keys_dir.join(SECRET_FILE);
    let secret = fs::read_to_string(&path)
        .map_err(|e| {
            format!(
                "No account key at {} ({}); run `trustnet wallet create`",
                path.display(),
                e
            )
        })?;
    Ok(Keypair::from_secret_hex(secret.trim())?)
}

fn save_keypair(
    keys_dir: &Path,
    keypair: &Keypair,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let secret_path = keys_dir.join(SECRET_FILE);
    if secret_path.exists() && !force {
        return Err(format!(
            "Account key already exists at {}; pass --force to replace it",
            secret_path.display()
        )
        .into());
    }
    fs::create_dir_all(keys_dir)?;
    fs::write(&secret_path, keypair.secret_hex())?;
    restrict_permissions(&secret_path)?;
    fs::write(keys_dir.join(ADDRESS_FILE), keypair.address())?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
