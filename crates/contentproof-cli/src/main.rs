// ContentProof CLI - fingerprint, prove and verify content from the command line

mod client;
pub mod metadata;

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use colored::Colorize;
use contentproof_crypto::{
    build_fingerprint, build_proof, hash_bytes, hash_reader, require_digest, shorten_for_display,
    verify_integrity_reader, ContentInfo, Fingerprint, ProofObject, DEFAULT_VISIBLE_EDGE,
};
use uuid::Uuid;

use client::{ApiClient, UploadRequest, DEFAULT_SERVER};

/// ContentProof - content fingerprints and ownership proofs
#[derive(Parser)]
#[command(name = "contentproof")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA-256 content hash of a file
    Hash {
        /// Path to the file
        path: String,
    },
    /// Print the fingerprint of a file and its metadata
    Fingerprint {
        /// Path to the file
        path: String,

        /// MIME type recorded as fileType
        #[arg(short = 't', long = "type", value_name = "MIME")]
        mime_type: Option<String>,

        /// Add metadata key=value pairs (can be specified multiple times)
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,
    },
    /// Build an ownership proof for a file
    Prove {
        /// Path to the file
        path: String,

        /// Owner wallet address
        #[arg(long)]
        owner: String,

        /// Claim timestamp (ISO 8601); defaults to now
        #[arg(long)]
        timestamp: Option<String>,

        /// Add metadata key=value pairs (can be specified multiple times)
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,

        /// Write the proof to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check a file against an expected content hash
    Verify {
        /// Path to the file
        path: String,

        /// Expected SHA-256 hex digest
        digest: String,
    },
    /// Recompute a saved proof object
    CheckProof {
        /// Path to the proof JSON
        proof: String,

        /// Also check that this file matches the proof's content hash
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Register a file with a ContentProof server
    Upload {
        /// Path to the file
        path: String,

        /// Registered user id
        #[arg(long)]
        user: Uuid,

        /// Wallet address of the user
        #[arg(long)]
        owner: String,

        /// MIME type recorded as fileType
        #[arg(short = 't', long = "type", value_name = "MIME")]
        mime_type: Option<String>,

        /// Add metadata key=value pairs (can be specified multiple times)
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,

        /// Server base URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
    /// Look up the registered proof for a content hash
    Lookup {
        /// SHA-256 hex digest
        digest: String,

        /// Server base URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash { path } => handle_hash(&path),
        Commands::Fingerprint {
            path,
            mime_type,
            meta,
        } => handle_fingerprint(&path, mime_type, &meta),
        Commands::Prove {
            path,
            owner,
            timestamp,
            meta,
            output,
        } => handle_prove(&path, &owner, timestamp, &meta, output.as_deref()),
        Commands::Verify { path, digest } => handle_verify(&path, &digest),
        Commands::CheckProof { proof, file } => handle_check_proof(&proof, file.as_deref()),
        Commands::Upload {
            path,
            user,
            owner,
            mime_type,
            meta,
            server,
        } => handle_upload(&path, user, &owner, mime_type, &meta, &server),
        Commands::Lookup { digest, server } => handle_lookup(&digest, &server),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_hash(path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open '{}'", path))?;
    let hash = hash_reader(file).with_context(|| format!("Failed to read '{}'", path))?;
    println!("{}", hash);
    Ok(())
}

fn handle_fingerprint(path: &str, mime_type: Option<String>, meta: &[String]) -> Result<()> {
    let fingerprint = fingerprint_file(path, mime_type.unwrap_or_default(), meta)?;
    println!("{}", serde_json::to_string_pretty(&fingerprint)?);
    Ok(())
}

fn handle_prove(
    path: &str,
    owner: &str,
    timestamp: Option<String>,
    meta: &[String],
    output: Option<&str>,
) -> Result<()> {
    let proof = prove_file(path, owner, timestamp, meta)?;
    let json = serde_json::to_string_pretty(&proof)?;

    match output {
        Some(output) => {
            std::fs::write(output, &json)
                .with_context(|| format!("Failed to write '{}'", output))?;
            println!("{} Proof written to: {}", "✓".green().bold(), output);
            println!("  Hash:  {}", shorten_for_display(&proof.hash, DEFAULT_VISIBLE_EDGE));
            println!("  Owner: {}", proof.owner);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_verify(path: &str, digest: &str) -> Result<()> {
    if verify_file(path, digest)? {
        println!("{} {}", "✓".green().bold(), "Content matches digest".green());
        Ok(())
    } else {
        eprintln!("{} {}", "✗".red().bold(), "Content does not match digest".red());
        Err(anyhow!("'{}' does not hash to {}", path, digest))
    }
}

fn handle_check_proof(proof_path: &str, file: Option<&str>) -> Result<()> {
    let proof = load_proof(proof_path)?;

    if !proof.verify() {
        eprintln!("{} {}", "✗".red().bold(), "Proof does not recompute".red());
        return Err(anyhow!("Proof in '{}' is invalid", proof_path));
    }

    if let Some(file) = file {
        if !verify_file(file, &proof.hash)? {
            eprintln!("{} {}", "✗".red().bold(), "File does not match proof".red());
            return Err(anyhow!("'{}' does not hash to {}", file, proof.hash));
        }
    }

    println!("{} {}", "✓".green().bold(), "Proof verified".green());
    println!();
    println!("  Hash:      {}", shorten_for_display(&proof.hash, DEFAULT_VISIBLE_EDGE));
    println!("  Owner:     {}", proof.owner);
    println!("  Timestamp: {}", proof.timestamp);
    Ok(())
}

fn handle_upload(
    path: &str,
    user: Uuid,
    owner: &str,
    mime_type: Option<String>,
    meta: &[String],
    server: &str,
) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path))?;

    let request = UploadRequest {
        user_id: user,
        wallet_address: owner.to_string(),
        file_name: file_name_of(path),
        file_type: mime_type.unwrap_or_default(),
        content: BASE64_STANDARD.encode(&bytes),
        metadata: metadata::parse_metadata(meta)?,
    };

    let content = ApiClient::new(server).upload(&request)?;

    println!("{} Content registered!", "✓".green().bold());
    println!();
    println!("  Id:        {}", content["id"].as_str().unwrap_or("-"));
    println!("  Hash:      {}", content["fileHash"].as_str().unwrap_or("-"));
    println!("  Proof:     {}", content["proof"].as_str().unwrap_or("-"));
    println!("  Timestamp: {}", content["timestamp"].as_str().unwrap_or("-"));
    match content["blockchainTxn"].as_str() {
        Some(tx) => println!("  Ledger tx: {}", tx),
        None => println!("  Ledger tx: {}", "not anchored".yellow()),
    }
    Ok(())
}

fn handle_lookup(digest: &str, server: &str) -> Result<()> {
    require_digest(digest)?;
    let verification = ApiClient::new(server).lookup(&digest.to_lowercase())?;

    if verification["isValid"].as_bool().unwrap_or(false) {
        println!("{} {}", "✓".green().bold(), "Proof recomputes".green());
    } else {
        println!("{} {}", "✗".red().bold(), "Stored proof does not recompute".red());
    }
    println!();
    println!("  Owner:     {}", verification["ownerDid"].as_str().unwrap_or("-"));
    println!("  File:      {}", verification["fileName"].as_str().unwrap_or("-"));
    println!("  Timestamp: {}", verification["timestamp"].as_str().unwrap_or("-"));
    let anchored = if verification["anchored"].as_bool().unwrap_or(false) {
        "anchored".cyan().to_string()
    } else {
        "not anchored".yellow().to_string()
    };
    println!("  Ledger:    {}", anchored);
    Ok(())
}

/// Final path component, or the path itself when there is none.
fn file_name_of(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

fn fingerprint_file(path: &str, mime_type: String, meta: &[String]) -> Result<Fingerprint> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path))?;
    let metadata = metadata::parse_metadata(meta)?;
    let info = ContentInfo::new(file_name_of(path), mime_type);
    Ok(build_fingerprint(&bytes, &info, &metadata)?)
}

fn prove_file(
    path: &str,
    owner: &str,
    timestamp: Option<String>,
    meta: &[String],
) -> Result<ProofObject> {
    if owner.trim().is_empty() {
        return Err(anyhow!("Owner address must not be empty"));
    }
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path))?;
    let metadata = metadata::parse_metadata(meta)?;
    Ok(build_proof(&hash_bytes(&bytes), owner.trim(), timestamp, metadata)?)
}

/// Digest format is checked before the file is touched.
fn verify_file(path: &str, digest: &str) -> Result<bool> {
    require_digest(digest)?;
    let file = File::open(path).with_context(|| format!("Failed to open '{}'", path))?;
    Ok(verify_integrity_reader(file, &digest.to_lowercase()))
}

fn load_proof(path: &str) -> Result<ProofObject> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let proof: ProofObject = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse proof object in '{}'", path))?;
    require_digest(&proof.hash)?;
    Ok(proof)
}
