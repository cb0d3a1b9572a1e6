use super::*;

/// Tests creating, finding and removing a link.
///
/// Expected: exists after create, gone after delete, second delete reports false
#[tokio::test]
async fn creates_and_deletes_link() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let fuel = factory::create_fuel(db).await?;
    let draft = factory::create_draft(db, user.id).await?;

    let repo = CombustionRequestFuelRepository::new(db);

    let link = repo.create(draft.id, fuel.id, 2.5).await?;
    assert_eq!(link.fuel_volume, 2.5);
    assert!(!link.is_calculated);
    assert!(repo.exists(draft.id, fuel.id).await?);

    assert!(repo.delete(draft.id, fuel.id).await?);
    assert!(!repo.exists(draft.id, fuel.id).await?);
    assert!(!repo.delete(draft.id, fuel.id).await?);

    Ok(())
}

/// Tests changing a link's volume.
///
/// Expected: true and the new volume for an existing link, false for a missing one
#[tokio::test]
async fn updates_volume() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let fuel = factory::create_fuel(db).await?;
    let other_fuel = factory::create_fuel(db).await?;
    let draft = factory::create_draft(db, user.id).await?;
    factory::create_link(db, draft.id, fuel.id).await?;

    let repo = CombustionRequestFuelRepository::new(db);

    assert!(repo.update_volume(draft.id, fuel.id, 7.0).await?);
    assert!(!repo.update_volume(draft.id, other_fuel.id, 7.0).await?);

    let fuels = repo.get_fuels(draft.id).await?;
    assert_eq!(fuels.len(), 1);
    assert_eq!(fuels[0].fuel_volume, 7.0);

    Ok(())
}

/// Tests a request keeps showing fuels deleted from the catalog after they were added.
///
/// Expected: both fuels listed with their fuel data
#[tokio::test]
async fn get_fuels_includes_deleted_catalog_entries() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let coal = factory::fuel::FuelFactory::new(db).title("Coal").build().await?;
    let peat = factory::fuel::FuelFactory::new(db)
        .title("Peat")
        .deleted(true)
        .build()
        .await?;
    let request = factory::create_submitted(db, user.id).await?;
    factory::create_link(db, request.id, coal.id).await?;
    factory::create_link(db, request.id, peat.id).await?;

    let fuels = CombustionRequestFuelRepository::new(db)
        .get_fuels(request.id)
        .await?;

    let titles: Vec<&str> = fuels.iter().map(|f| f.fuel.title.as_str()).collect();
    assert_eq!(titles, vec!["Coal", "Peat"]);

    Ok(())
}

/// Tests calculator inputs carry the fuel's physical data.
///
/// Expected: one input per link with the fuel's heat and the link's volume
#[tokio::test]
async fn builds_calculation_inputs() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request, links) =
        factory::helpers::create_submitted_request_with_fuels(db, &[(10.0, 2.0), (5.0, 3.0)])
            .await?;

    let inputs = CombustionRequestFuelRepository::new(db)
        .get_calculation_inputs(request.id)
        .await?;

    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].fuel_id, links[0].fuel_id);
    assert_eq!(inputs[0].heat, 10.0);
    assert_eq!(inputs[0].fuel_volume, 2.0);
    assert_eq!(inputs[1].heat, 5.0);
    assert_eq!(inputs[1].fuel_volume, 3.0);

    Ok(())
}
