use super::*;

/// Tests the first result for a link wins.
///
/// Expected: first write true, second write false, stored energy from the first
#[tokio::test]
async fn records_first_result_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request, links) =
        factory::helpers::create_submitted_request_with_fuels(db, &[(10.0, 1.0)]).await?;
    let fuel_id = links[0].fuel_id;

    let repo = CombustionRequestFuelRepository::new(db);

    assert!(repo.record_result(request.id, fuel_id, 100.0).await?);
    assert!(!repo.record_result(request.id, fuel_id, 999.0).await?);

    let fuels = repo.get_fuels(request.id).await?;
    assert_eq!(fuels[0].intermediate_energy, Some(100.0));
    assert!(fuels[0].is_calculated);

    Ok(())
}

/// Tests a result for a fuel that is not in the request.
///
/// Expected: false and nothing counted
#[tokio::test]
async fn ignores_result_for_unknown_link() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request, _) =
        factory::helpers::create_submitted_request_with_fuels(db, &[(10.0, 1.0)]).await?;
    let stranger = factory::create_fuel(db).await?;

    let repo = CombustionRequestFuelRepository::new(db);

    assert!(!repo.record_result(request.id, stranger.id, 1.0).await?);
    assert_eq!(repo.count_calculated(request.id).await?, 0);

    Ok(())
}

/// Tests counting and summing partial results.
///
/// Expected: counts track calculated links; sum covers calculated links only
#[tokio::test]
async fn counts_and_sums_results() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, request, links) = factory::helpers::create_submitted_request_with_fuels(
        db,
        &[(10.0, 1.0), (5.0, 1.0), (1.0, 1.0)],
    )
    .await?;

    let repo = CombustionRequestFuelRepository::new(db);
    repo.record_result(request.id, links[0].fuel_id, 100.0).await?;
    repo.record_result(request.id, links[1].fuel_id, 50.0).await?;

    assert_eq!(repo.count_by_request(request.id).await?, 3);
    assert_eq!(repo.count_calculated(request.id).await?, 2);
    assert_eq!(repo.sum_energy(request.id).await?, 150.0);

    Ok(())
}

/// Tests clearing results before a new session.
///
/// Expected: every link uncalculated without energy
#[tokio::test]
async fn resets_results() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let request = factory::create_submitted(db, user.id).await?;
    let fuel = factory::create_fuel(db).await?;
    factory::combustion_request_fuel::LinkFactory::new(db, request.id, fuel.id)
        .calculated(42.0)
        .build()
        .await?;

    let repo = CombustionRequestFuelRepository::new(db);

    assert_eq!(repo.reset_results(request.id).await?, 1);
    assert_eq!(repo.count_calculated(request.id).await?, 0);
    assert_eq!(repo.sum_energy(request.id).await?, 0.0);
    assert!(repo.get_fuels(request.id).await?[0]
        .intermediate_energy
        .is_none());

    Ok(())
}
