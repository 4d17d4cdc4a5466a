use cliente_directory::infra::{config, logging};
use cliente_directory::{ClientConfig, HttpGateway, RecordGateway, TipoDocumento};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (or .env):\n\
           CLIENTES_API_BASE_URL (default {})\n\
           CLIENTES_HTTP_TIMEOUT_SECS (default {})\n",
        config::DEFAULT_BASE_URL,
        config::DEFAULT_TIMEOUT_SECS
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let client_config = ClientConfig::from_env();
    println!("> Preflight:");
    println!("  CLIENTES_API_BASE_URL={}", client_config.base_url);
    match client_config.timeout {
        Some(t) => println!("  CLIENTES_HTTP_TIMEOUT_SECS={}", t.as_secs()),
        None => println!("  CLIENTES_HTTP_TIMEOUT_SECS=0 (no timeout)"),
    }

    let gateway = HttpGateway::new(&client_config)?;
    println!("  Endpoint: {}api/clientes/", gateway.base_url());

    match gateway.list().await {
        Ok(records) => {
            let dni = records
                .iter()
                .filter(|r| r.tipo_documento == TipoDocumento::Dni)
                .count();
            println!(
                "  Listing works: {} clientes ({} DNI, {} RUC/otros)",
                records.len(),
                dni,
                records.len() - dni
            );
        }
        Err(e) => {
            return Err(anyhow::anyhow!("listing failed [{}]: {}", e.kind(), e));
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
