use climate_normals::{ClimateConfig, ClimateError, ClimateTable, DestinationId, OpenMeteoEngine};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), ClimateError> {
    let data_folder = std::env::temp_dir().join("climate_normals_demo");
    let config = ClimateConfig::builder()
        .request_timeout(Duration::from_secs(30))
        .cache_ttl(Duration::from_secs(3600))
        .build();
    let engine = OpenMeteoEngine::with_data_folder(data_folder, config).await?;

    let destinations = [
        ("bali", -8.4095, 115.1889),
        ("lisbon", 38.7223, -9.1393),
        ("reykjavik", 64.1466, -21.9426),
    ];

    for (slug, latitude, longitude) in destinations {
        engine
            .store()
            .register_destination(&DestinationId::parse(slug)?)
            .await?;

        let record = engine
            .compute()
            .destination(slug)
            .latitude(latitude)
            .longitude(longitude)
            .call()
            .await?;

        let meta = &record.profile.meta;
        println!("{} ({:.4}, {:.4}), {}", slug, latitude, longitude, meta.note);
        println!(
            "window {} .. {}, marine probes: {}",
            meta.window.start, meta.window.end, meta.marine.probes
        );
        println!("{}", ClimateTable::from_profile(&record.profile));
    }

    if let Some(stored) = engine.stored().destination("bali").call().await? {
        println!("bali last updated at {}", stored.updated_at);
    }

    Ok(())
}
