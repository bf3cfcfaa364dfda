use anyhow::{Result, bail};

/// Programs spawned by `moitt`, with what they are needed for.
const CLUSTER_TOOLS: &[(&str, &str, bool)] = &[
    ("oc", "every component", true),
    ("htpasswd", "test users (ocp install)", true),
    ("curl", "installer download", true),
    ("tar", "installer download", true),
    ("openshift-install", "optional, downloaded per version when missing", false),
];

/// Reports which cluster tools are on `PATH`.
///
/// # Errors
/// Returns an error if a required tool is missing.
pub fn check_cluster_tools() -> Result<()> {
    println!("🩺 Checking cluster tools...");

    let mut missing = Vec::new();
    for &(tool, purpose, required) in CLUSTER_TOOLS {
        match which::which(tool) {
            Ok(path) => println!("✅ {tool:<18} {}", path.display()),
            Err(_) if required => {
                println!("❌ {tool:<18} missing, needed for {purpose}");
                missing.push(tool);
            },
            Err(_) => println!("➖ {tool:<18} not found ({purpose})"),
        }
    }

    if !missing.is_empty() {
        bail!("Missing required tools: {}", missing.join(", "));
    }
    println!("\n✨ All required tools found.");
    Ok(())
}
