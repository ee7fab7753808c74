//! Text and JSON rendering of command results.

use maquila_core::batch::NewBatch;
use maquila_core::dates::format_display;
use maquila_core::presentation::{BatchCardView, ProductCardView, VerificationView};
use maquila_core::validation::ValidationErrors;
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn verification(view: &VerificationView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(view);
    }

    println!("{}", view.status_label);
    println!();
    println!("{}", view.product_name);
    println!("Registro Sanitario: {}", view.registro_sanitario);
    if view.has_product_image {
        println!("Imagen: {}", view.product_image_url);
    }
    println!("Número de Maquilla: {}", view.numero_maquilla);
    println!("Variedad: {}", view.variedad_arroz);
    println!("Fecha de Producción: {}", view.fecha_produccion);
    println!("Fecha de Vencimiento: {}", view.fecha_vencimiento);
    if let Some(file_name) = &view.qr_download_filename {
        println!("Código QR: {} ({file_name})", view.qr_code_url);
    }
    println!("ID del Lote: {}", view.batch_id);
    Ok(())
}

pub(crate) fn product_cards(cards: &[ProductCardView], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(cards);
    }
    for card in cards {
        println!("{}\t{}\t{}", card.id, card.name, card.registro_sanitario);
        if card.has_image {
            println!("\t{}", card.image_url);
        }
    }
    Ok(())
}

pub(crate) fn batch_cards(cards: &[BatchCardView], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(cards);
    }
    for card in cards {
        let badge = card.badge.map(|b| format!(" [{b}]")).unwrap_or_default();
        println!(
            "{}\t{}\t{}\t{} - {}{badge}",
            card.id,
            card.numero_maquilla,
            card.variedad_arroz,
            card.fecha_produccion,
            card.fecha_vencimiento,
        );
        if card.has_qr_code {
            println!("\t{}", card.qr_code_url);
        }
    }
    Ok(())
}

pub(crate) fn accepted_batch(batch: &NewBatch, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(batch);
    }
    println!(
        "OK\t{}\t{}\t{} - {}",
        batch.numero_maquilla,
        batch.variedad_arroz,
        format_display(batch.fecha_produccion),
        format_display(batch.fecha_vencimiento),
    );
    Ok(())
}

/// Machine-readable field errors; the text form is printed by `main`.
pub(crate) fn violations(errors: &ValidationErrors) -> anyhow::Result<()> {
    print_json(errors)
}

pub(crate) fn deleted(entity: &str, id: &str, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({ "deleted": entity, "id": id }));
    }
    println!("Deleted {entity} {id}");
    Ok(())
}
