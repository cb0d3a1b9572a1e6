use super::*;

/// Tests the whole path from an empty cart to a calculated request.
///
/// A buyer adds fuel A with volume 10 and fuel B with volume 5, sets the molar volume and
/// submits. A moderator starts the session and the calculator answers 100 and 50.
///
/// Expected: two jobs carrying the buyer's volumes; request completed with final result 150
#[tokio::test]
async fn buyer_draft_is_calculated_to_completion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_combustion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let buyer = factory::create_user(db).await?;
    let moderator = factory::create_moderator(db).await?;
    let fuel_a = factory::create_fuel(db).await?;
    let fuel_b = factory::create_fuel(db).await?;
    let combustion = CombustionService::new(db);

    let draft = combustion.add_fuel_to_draft(buyer.id, fuel_a.id, 10.0).await?;
    let request_id = draft.request.id;
    combustion.add_fuel_to_draft(buyer.id, fuel_b.id, 5.0).await?;
    combustion
        .set_molar_volume(request_id, buyer.id, DEFAULT_MOLAR_VOLUME)
        .await?;
    let submitted = combustion.submit(request_id, buyer.id).await?;
    assert_eq!(submitted.status, RequestStatus::Submitted);

    let (calculator, dispatcher) = dispatcher();
    let settings = settings(None);
    let calculation = CalculationService::new(db, &dispatcher, &settings);

    let session = calculation.start_session(request_id, moderator.id).await?;
    dispatcher.drain().await;
    assert_eq!(session.fuel_count, 2);
    assert_eq!(session.molar_volume, DEFAULT_MOLAR_VOLUME);

    let mut jobs = calculator.jobs();
    jobs.sort_by_key(|(job, _)| job.fuel_id);
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].0.fuel_id, fuel_a.id);
    assert_eq!(jobs[0].0.fuel_volume, 10.0);
    assert_eq!(jobs[1].0.fuel_id, fuel_b.id);
    assert_eq!(jobs[1].0.fuel_volume, 5.0);

    calculation
        .receive_result(result(request_id, fuel_a.id, 100.0, &session.token))
        .await?;
    let halfway = calculation.progress(request_id).await?;
    assert_eq!(halfway.request.status, RequestStatus::Submitted);
    assert_eq!(halfway.calculated_count, 1);

    calculation
        .receive_result(result(request_id, fuel_b.id, 50.0, &session.token))
        .await?;

    let detail = combustion.get_detail(request_id, buyer.id, false).await?;
    assert_eq!(detail.request.status, RequestStatus::Completed);
    assert_eq!(detail.request.final_result, Some(150.0));
    assert_eq!(detail.request.moderator_id, Some(moderator.id));
    assert!(detail.fuels.iter().all(|f| f.is_calculated));

    Ok(())
}
