//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{
    combustion_request::CombustionRequestFactory, combustion_request_fuel::LinkFactory,
    fuel::FuelFactory, user::create_user,
};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a submitted request owned by a fresh buyer with one link per `(heat, volume)` pair.
///
/// Every fuel gets the given heat and a molar mass and density of `1.0`. The request uses
/// the default molar volume.
///
/// # Arguments
/// - `db` - Database connection
/// - `fuels` - Heat and fuel volume for each link to create
///
/// # Returns
/// - `Ok((creator, request, links))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_submitted_request_with_fuels(
    db: &DatabaseConnection,
    fuels: &[(f64, f64)],
) -> Result<
    (
        entity::user::Model,
        entity::combustion_request::Model,
        Vec<entity::combustion_request_fuel::Model>,
    ),
    DbErr,
> {
    let creator = create_user(db).await?;
    let request = CombustionRequestFactory::new(db, creator.id)
        .status("submitted")
        .build()
        .await?;

    let mut links = Vec::with_capacity(fuels.len());
    for (heat, volume) in fuels {
        let fuel = FuelFactory::new(db).heat(*heat).build().await?;
        let link = LinkFactory::new(db, request.id, fuel.id)
            .fuel_volume(*volume)
            .build()
            .await?;
        links.push(link);
    }

    Ok((creator, request, links))
}
