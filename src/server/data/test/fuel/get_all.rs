use super::*;

/// Tests that soft-deleted fuels are left out of the catalog.
///
/// Expected: only active fuels, ordered by ID
#[tokio::test]
async fn excludes_deleted_fuels() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Fuel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let coal = factory::fuel::FuelFactory::new(db).title("Coal").build().await?;
    factory::fuel::FuelFactory::new(db)
        .title("Peat")
        .deleted(true)
        .build()
        .await?;
    let methane = factory::fuel::FuelFactory::new(db).title("Methane").build().await?;

    let fuels = FuelRepository::new(db).get_all(None).await?;

    let ids: Vec<i32> = fuels.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![coal.id, methane.id]);

    Ok(())
}

/// Tests title search ignores case, including non-ASCII titles.
///
/// Expected: substring matches regardless of case
#[tokio::test]
async fn filters_by_title_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Fuel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::fuel::FuelFactory::new(db).title("Natural Gas").build().await?;
    factory::fuel::FuelFactory::new(db).title("Бензин").build().await?;
    factory::fuel::FuelFactory::new(db).title("Coal").build().await?;

    let repo = FuelRepository::new(db);

    let gas = repo.get_all(Some("GAS")).await?;
    assert_eq!(gas.len(), 1);
    assert_eq!(gas[0].title, "Natural Gas");

    let petrol = repo.get_all(Some("бЕНЗ")).await?;
    assert_eq!(petrol.len(), 1);
    assert_eq!(petrol[0].title, "Бензин");

    assert_eq!(repo.get_all(Some("  ")).await?.len(), 3);

    Ok(())
}

/// Tests a deleted fuel is not returned by ID.
///
/// Expected: Ok(None)
#[tokio::test]
async fn get_by_id_hides_deleted_fuel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Fuel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let fuel = factory::fuel::FuelFactory::new(db).deleted(true).build().await?;

    assert!(FuelRepository::new(db).get_by_id(fuel.id).await?.is_none());

    Ok(())
}

/// Tests creating a fuel.
///
/// Expected: created fuel is active and has no image
#[tokio::test]
async fn creates_fuel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Fuel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let fuel = FuelRepository::new(db)
        .create(CreateFuelParams {
            title: "Propane".to_string(),
            heat: 2220.0,
            molar_mass: 44.1,
            density: 1.88,
            short_desc: Some("LPG".to_string()),
            full_desc: None,
            is_gas: true,
        })
        .await?;

    assert_eq!(fuel.title, "Propane");
    assert!(fuel.is_gas);
    assert!(fuel.card_image.is_none());
    assert_eq!(FuelRepository::new(db).get_all(None).await?.len(), 1);

    Ok(())
}
