//! `cliente-directory`: command-line front end over the clientes service.
//!
//! Each invocation activates one directory screen: it loads the collection,
//! applies the requested operation and prints the resulting view.

use anyhow::{anyhow, bail, Context};
use cliente_directory::infra::logging;
use cliente_directory::{
    ClientConfig, ClienteRecord, DirectoryError, DirectoryManager, DirectoryView, NavEvent,
    Navigation, Presentation, SearchStrategy,
};
use std::io::{self, BufRead, Write};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cliente-directory <command> [args]\n\
         \n\
         Commands:\n\
           list\n\
           search <nombre|documento|dni|ruc> <query>   filter the loaded list locally\n\
           buscar <DNI|RUC>                            server-side search by document type\n\
           get <id>\n\
           create key=value...                         nombre, apellido, telefono, email,\n\
                                                       tipo_documento, numero_documento\n\
           update <id> key=value...                    full update starting from the stored record\n\
           patch <id> key=value...\n\
           delete <id> [--yes]\n\
         \n\
         Env: CLIENTES_API_BASE_URL, CLIENTES_HTTP_TIMEOUT_SECS, RUST_LOG\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        usage_and_exit();
    };
    if command == "-h" || command == "--help" {
        usage_and_exit();
    }
    let rest = &args[1..];

    let manager = DirectoryManager::from_config(&ClientConfig::from_env())?;
    let mut nav = Navigation::new();

    match command.as_str() {
        "list" => {
            load_or_report(&manager).await;
        }
        "search" => {
            let [strategy, query @ ..] = rest else {
                usage_and_exit();
            };
            let strategy: SearchStrategy = strategy.parse().map_err(|e: String| anyhow!(e))?;
            if load_or_report(&manager).await {
                manager.search_local(&query.join(" "), strategy);
            }
        }
        "buscar" => {
            let [tipo] = rest else {
                usage_and_exit();
            };
            if load_or_report(&manager).await {
                if let Err(e) = manager.search_remote(tipo).await {
                    report(&e);
                }
            }
        }
        "get" => {
            let id = parse_id(rest.first())?;
            match manager.fetch_record(id).await {
                Ok(record) => print_record(&record),
                Err(e) => report(&e),
            }
            return Ok(());
        }
        "create" => {
            nav.apply(NavEvent::OpenCreate);
            let mut record = ClienteRecord::default();
            apply_assignments(&mut record, rest)?;
            match manager.create_record(&record).await {
                Ok(created) => {
                    println!("Cliente registrado:");
                    print_record(&created);
                    nav.apply(NavEvent::Saved);
                }
                Err(e) => {
                    report(&e);
                    nav.apply(NavEvent::Close);
                }
            }
            refresh(&manager, &nav).await;
        }
        "update" | "patch" => {
            let id = parse_id(rest.first())?;
            let assignments = &rest[1..];
            let outcome = if command == "update" {
                let mut record = match manager.fetch_record(id).await {
                    Ok(record) => record,
                    Err(e) => {
                        report(&e);
                        return Ok(());
                    }
                };
                nav.apply(NavEvent::OpenEdit(record.clone()));
                apply_assignments(&mut record, assignments)?;
                manager.update_record(id, &record).await
            } else {
                nav.apply(NavEvent::OpenEdit(ClienteRecord::default().with_id(id)));
                let mut patch = ClienteRecord::default();
                apply_assignments(&mut patch, assignments)?;
                manager.patch_record(id, &patch).await
            };
            match outcome {
                Ok(updated) => {
                    println!("Cliente actualizado:");
                    print_record(&updated);
                    nav.apply(NavEvent::Saved);
                }
                Err(e) => {
                    report(&e);
                    nav.apply(NavEvent::Close);
                }
            }
            refresh(&manager, &nav).await;
        }
        "delete" => {
            let id = parse_id(rest.first())?;
            let assume_yes = rest.iter().any(|a| a == "--yes" || a == "-y");
            if !load_or_report(&manager).await {
                return Ok(());
            }
            let record = manager
                .records()
                .into_iter()
                .find(|r| r.id == Some(id))
                .ok_or_else(|| anyhow!("no hay cliente con id {}", id))?;
            if !assume_yes && !confirm(&record)? {
                println!("Eliminación cancelada.");
                return Ok(());
            }
            if let Err(e) = manager.delete_record(&record).await {
                report(&e);
            }
        }
        other => {
            eprintln!("Unknown command '{}'", other);
            usage_and_exit();
        }
    }

    print_view(&manager.view());
    Ok(())
}

/// Loads the directory; on failure the error is printed and `false` returned.
async fn load_or_report(manager: &DirectoryManager) -> bool {
    match manager.load().await {
        Ok(()) => true,
        Err(e) => {
            report(&e);
            false
        }
    }
}

async fn refresh(manager: &DirectoryManager, nav: &Navigation) {
    let result = if nav.revision() > 0 {
        manager.refresh(nav.revision()).await.map(|_| ())
    } else {
        manager.load().await
    };
    if let Err(e) = result {
        report(&e);
    }
}

fn parse_id(arg: Option<&String>) -> anyhow::Result<i64> {
    let raw = arg.ok_or_else(|| anyhow!("missing <id>"))?;
    raw.parse::<i64>()
        .with_context(|| format!("invalid id '{}'", raw))
}

fn canonical_field(key: &str) -> &str {
    match key {
        "tipo" => "tipo_documento",
        "documento" | "numero" => "numero_documento",
        "nombres" => "nombre",
        "apellidos" => "apellido",
        "correo" => "email",
        other => other,
    }
}

fn apply_assignments(record: &mut ClienteRecord, assignments: &[String]) -> anyhow::Result<()> {
    for assignment in assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("expected key=value, got '{}'", assignment);
        };
        let field = canonical_field(key.trim());
        let value = if field == "tipo_documento" {
            value.trim().to_uppercase()
        } else {
            value.to_string()
        };
        if !record.set_field(field, &value) {
            bail!("unknown field '{}'", key);
        }
    }
    Ok(())
}

fn confirm(record: &ClienteRecord) -> anyhow::Result<bool> {
    print!(
        "¿Estás seguro de que deseas eliminar a {}? [s/N] ",
        record.full_name()
    );
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}

fn report(err: &DirectoryError) {
    eprintln!("Error [{}]: {}", err.kind(), err);
    if let Some(fields) = err.field_errors() {
        for (field, messages) in fields {
            eprintln!("  {}: {}", field, messages.join(" "));
        }
    }
}

fn print_record(record: &ClienteRecord) {
    println!("  {}", record);
    println!("    tel: {}  email: {}", record.telefono, record.email);
}

fn print_view(view: &DirectoryView) {
    println!(
        "Clientes  Totales: {}  DNI: {}  RUC: {}",
        view.total, view.dni_count, view.ruc_count
    );
    if let Some(filter) = &view.filter {
        println!("Filtro activo: {:?}", filter);
    }
    match view.presentation() {
        Presentation::Loading => println!("Cargando..."),
        Presentation::Error(message) => println!("Error al cargar clientes: {}", message),
        Presentation::Empty => println!("No hay clientes registrados"),
        Presentation::Records => {
            for record in &view.records {
                print_record(record);
            }
        }
    }
}
