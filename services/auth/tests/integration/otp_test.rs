use chrono::Duration;

use sesame_auth::domain::types::OTP_TTL_SECS;
use sesame_auth::error::AuthServiceError;
use sesame_auth::usecase::otp::{
    RequestOtpInput, RequestOtpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};

use crate::helpers::{MockMailer, MockOtpRepo, MockUserStore, test_otp, test_user};

// ── Issuance ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_six_digit_code_with_five_minute_expiry() {
    let user = test_user();

    let otp_repo = MockOtpRepo::empty();
    let records = otp_repo.records_handle();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();

    let uc = RequestOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: otp_repo,
        mailer,
    };

    uc.execute(RequestOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1, "expected exactly one OTP record");

    let record = records.get(&user.id).expect("record keyed by user id");
    assert_eq!(record.code.len(), 6);
    assert!(record.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(
        record.expires_at - record.created_at,
        Duration::seconds(OTP_TTL_SECS),
        "expiry should be exactly 5 minutes after issuance"
    );

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1, "expected exactly one outbound notification");
    assert_eq!(sent[0].to, user.email);
    assert_eq!(sent[0].subject, "Your OTP Code");
    assert!(sent[0].content.text.contains(&record.code));
    let html = sent[0].content.html.as_ref().expect("html rendition");
    assert_eq!(html.otp.as_deref(), Some(record.code.as_str()));
}

#[tokio::test]
async fn should_not_issue_for_unknown_user() {
    let otp_repo = MockOtpRepo::empty();
    let records = otp_repo.records_handle();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();

    let uc = RequestOtpUseCase {
        users: MockUserStore::empty(),
        otps: otp_repo,
        mailer,
    };

    let result = uc
        .execute(RequestOtpInput {
            email: "nobody@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
    assert!(records.lock().unwrap().is_empty(), "no store write expected");
    assert!(sent.lock().unwrap().is_empty(), "no notification expected");
}

#[tokio::test]
async fn should_reject_empty_email() {
    let uc = RequestOtpUseCase {
        users: MockUserStore::new(vec![test_user()]),
        otps: MockOtpRepo::empty(),
        mailer: MockMailer::new(),
    };

    let result = uc
        .execute(RequestOtpInput {
            email: String::new(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::EmailRequired)),
        "expected EmailRequired, got {result:?}"
    );
}

#[tokio::test]
async fn should_invalidate_previous_code_on_reissue() {
    let user = test_user();
    // "000000" can never be generated (range starts at 100000), so the fresh
    // code is guaranteed to differ.
    let old = test_otp(user.id, "000000", 120);

    let otp_repo = MockOtpRepo::new(vec![old]);
    let records = otp_repo.records_handle();

    let uc = RequestOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: otp_repo,
        mailer: MockMailer::new(),
    };
    uc.execute(RequestOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();

    assert_eq!(records.lock().unwrap().len(), 1, "upsert replaces, not adds");

    let verify = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: MockOtpRepo {
            records: records.clone(),
        },
    };
    let result = verify
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "000000".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidOtp)),
        "old code must be invalid after re-issuance, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_record_when_delivery_fails() {
    let user = test_user();

    let otp_repo = MockOtpRepo::empty();
    let records = otp_repo.records_handle();

    let uc = RequestOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: otp_repo,
        mailer: MockMailer::failing(),
    };

    let result = uc
        .execute(RequestOtpInput {
            email: user.email.clone(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::Delivery(_))),
        "expected Delivery fault, got {result:?}"
    );
    // Persistence happens before delivery is attempted.
    assert_eq!(records.lock().unwrap().len(), 1);
}

// ── Verification ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_correct_code_exactly_once() {
    let user = test_user();
    let record = test_otp(user.id, "482913", 300);

    let otp_repo = MockOtpRepo::new(vec![record]);
    let records = otp_repo.records_handle();

    let uc = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: otp_repo,
    };

    let verified = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(verified.id, user.id);
    assert!(
        records.lock().unwrap().is_empty(),
        "record must be consumed on success"
    );

    // Replay with the same pair fails: the code is single-use.
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidOtp)),
        "expected InvalidOtp on replay, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_invalid_for_wrong_code_even_when_record_expired() {
    let user = test_user();

    // Valid record, wrong code.
    let uc = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: MockOtpRepo::new(vec![test_otp(user.id, "482913", 300)]),
    };
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "111111".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AuthServiceError::InvalidOtp)));

    // Expired record, wrong code: match is checked before expiry, so this is
    // still invalid, never expired.
    let uc = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: MockOtpRepo::new(vec![test_otp(user.id, "482913", -60)]),
    };
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "111111".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidOtp)),
        "wrong code must report invalid, not expired, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_expired_and_leave_record_in_place() {
    let user = test_user();
    let otp_repo = MockOtpRepo::new(vec![test_otp(user.id, "482913", -60)]);
    let records = otp_repo.records_handle();

    let uc = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: otp_repo,
    };

    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(AuthServiceError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
    assert_eq!(
        records.lock().unwrap().len(),
        1,
        "expired record is not auto-deleted"
    );

    // A following re-issuance overwrites the stale record and the new code
    // verifies.
    let issue = RequestOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: MockOtpRepo {
            records: records.clone(),
        },
        mailer: MockMailer::new(),
    };
    issue
        .execute(RequestOtpInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();

    let fresh_code = records.lock().unwrap().get(&user.id).unwrap().code.clone();
    let verify = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: MockOtpRepo {
            records: records.clone(),
        },
    };
    verify
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: fresh_code,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user_on_verify() {
    let uc = VerifyOtpUseCase {
        users: MockUserStore::empty(),
        otps: MockOtpRepo::empty(),
    };

    let result = uc
        .execute(VerifyOtpInput {
            email: "nobody@example.com".to_owned(),
            code: "482913".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_invalid_when_no_record_exists() {
    let user = test_user();
    let uc = VerifyOtpUseCase {
        users: MockUserStore::new(vec![user.clone()]),
        otps: MockOtpRepo::empty(),
    };

    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
}

// ── Store contract ───────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_idempotent() {
    use sesame_auth::domain::repository::OtpRepository;

    let user = test_user();
    let repo = MockOtpRepo::new(vec![test_otp(user.id, "482913", 300)]);

    repo.delete(user.id).await.unwrap();
    assert!(repo.find(user.id).await.unwrap().is_none());

    // Deleting a non-existent record is a no-op success.
    repo.delete(user.id).await.unwrap();
}
