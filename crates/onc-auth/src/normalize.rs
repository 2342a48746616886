//! Identity normalization: raw login payload → [`Identity`].
//!
//! The backend returns a different JSON shape per principal kind, in
//! camelCase, and only some variants carry an explicit `role` discriminator.
//! This module maps all of them into the one role-tagged [`Identity`] sum
//! type, exactly once, at the authentication boundary. Downstream code never
//! re-inspects field presence.
//!
//! Discrimination is ordered, first match wins:
//! 1. an explicit `role` field, when the backend sends one;
//! 2. an organization marker (`organizationId` + `organizationName`);
//! 3. a nested `profile` object — doctor fields (`specialization` /
//!    `licenseNumber`) checked strictly before the patient marker
//!    (`doctorId`), so a malformed payload carrying both resolves to doctor.
//!
//! Anything else fails with [`AuthError::UnrecognizedIdentityShape`].

use serde::Deserialize;
use serde_json::Value;

use onc_core::identity::{DoctorIdentity, Identity, OrganizationIdentity, PatientIdentity};
use onc_core::role::Role;

use crate::error::AuthError;

/// Normalize a raw login payload into a role-tagged [`Identity`].
///
/// # Errors
///
/// Returns [`AuthError::UnrecognizedIdentityShape`] when the payload matches
/// no known shape, a matched shape fails to parse, or the session token is
/// missing or empty.
pub fn normalize(payload: &Value) -> Result<Identity, AuthError> {
    // An explicit discriminator, when present, beats the field heuristics.
    if let Some(role) = payload.get("role").and_then(Value::as_str) {
        return match role.parse::<Role>() {
            Ok(Role::Organization) => organization(payload),
            Ok(Role::Doctor) => doctor(payload),
            Ok(Role::Patient) => patient(payload),
            Err(_) => Err(AuthError::UnrecognizedIdentityShape),
        };
    }

    if payload.get("organizationId").is_some()
        && payload
            .get("organizationName")
            .is_some_and(Value::is_string)
    {
        return organization(payload);
    }

    if let Some(profile) = payload.get("profile").filter(|p| p.is_object()) {
        // Doctor fields before patient fields: both may appear in a
        // malformed payload, and doctor must win.
        if profile.get("specialization").is_some() || profile.get("licenseNumber").is_some() {
            return doctor(payload);
        }
        if profile.get("doctorId").is_some() {
            return patient(payload);
        }
    }

    Err(AuthError::UnrecognizedIdentityShape)
}

fn organization(payload: &Value) -> Result<Identity, AuthError> {
    // The organization payload is flat and uses its own key names
    // (`organizationId`, `organizationName`); map it field by field.
    let wire: OrganizationWire = parse(payload)?;
    require_token(&wire.token)?;
    Ok(Identity::Organization(OrganizationIdentity {
        id: wire.organization_id,
        email: wire.email,
        name: wire.organization_name,
        country: wire.country,
        city: wire.city,
        active: wire.active,
        email_verified: wire.email_verified,
        doctor_quota: wire.doctor_quota,
        patient_quota: wire.patient_quota,
        token: wire.token,
    }))
}

fn doctor(payload: &Value) -> Result<Identity, AuthError> {
    // DoctorIdentity already speaks the backend's camelCase.
    let identity: DoctorIdentity = parse(payload)?;
    require_token(&identity.token)?;
    Ok(Identity::Doctor(identity))
}

fn patient(payload: &Value) -> Result<Identity, AuthError> {
    let identity: PatientIdentity = parse(payload)?;
    require_token(&identity.token)?;
    Ok(Identity::Patient(identity))
}

fn parse<T: for<'de> Deserialize<'de>>(payload: &Value) -> Result<T, AuthError> {
    serde_json::from_value(payload.clone()).map_err(|error| {
        tracing::debug!(%error, "identity payload matched a shape but failed to parse");
        AuthError::UnrecognizedIdentityShape
    })
}

fn require_token(token: &str) -> Result<(), AuthError> {
    if token.is_empty() {
        return Err(AuthError::UnrecognizedIdentityShape);
    }
    Ok(())
}

/// Flat organization login payload; its key names don't line up with
/// [`OrganizationIdentity`], so it gets its own wire shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationWire {
    organization_id: i64,
    email: String,
    organization_name: String,
    country: String,
    city: String,
    active: bool,
    email_verified: bool,
    doctor_quota: u32,
    patient_quota: u32,
    #[serde(default)]
    token: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn doctor_payload() -> Value {
        json!({
            "token": "tok_doc",
            "profile": {
                "id": 7,
                "organizationId": 3,
                "firstName": "Ana",
                "lastName": "Reyes",
                "specialization": "Oncología",
                "licenseNumber": "MED-0001",
                "email": "ana@example.com",
                "available": true
            }
        })
    }

    #[test]
    fn organization_shape_normalizes() {
        let payload = json!({
            "organizationId": 3,
            "email": "org@example.com",
            "organizationName": "Clínica Norte",
            "country": "MX",
            "city": "Monterrey",
            "active": true,
            "emailVerified": true,
            "doctorQuota": 10,
            "patientQuota": 200,
            "token": "tok_org"
        });
        let Identity::Organization(org) = normalize(&payload).expect("should normalize") else {
            panic!("expected organization identity");
        };
        assert_eq!(org.id, 3);
        assert_eq!(org.name, "Clínica Norte");
        assert_eq!(org.doctor_quota, 10);
        assert_eq!(org.token, "tok_org");
    }

    #[test]
    fn doctor_shape_normalizes() {
        let Identity::Doctor(doc) = normalize(&doctor_payload()).expect("should normalize") else {
            panic!("expected doctor identity");
        };
        assert_eq!(doc.profile.specialization, "Oncología");
        assert_eq!(doc.profile.license_number, "MED-0001");
        assert_eq!(doc.token, "tok_doc");
    }

    #[test]
    fn patient_shape_normalizes() {
        let payload = json!({
            "token": "tok_pat",
            "profile": {
                "id": 19,
                "doctorId": 7,
                "firstName": "Luz",
                "lastName": "Marín",
                "email": "luz@example.com",
                "birthDate": "1961-04-02",
                "diagnosis": "Carcinoma ductal",
                "treatmentStage": "quimioterapia"
            }
        });
        let Identity::Patient(pat) = normalize(&payload).expect("should normalize") else {
            panic!("expected patient identity");
        };
        assert_eq!(pat.profile.doctor_id, 7);
        assert_eq!(pat.profile.diagnosis.as_deref(), Some("Carcinoma ductal"));
        assert_eq!(pat.token, "tok_pat");
    }

    #[test]
    fn overlapping_profile_fields_resolve_to_doctor() {
        // Malformed payload carrying both doctor and patient markers:
        // the doctor check runs first and must win.
        let payload = json!({
            "token": "tok",
            "profile": {
                "id": 7,
                "organizationId": 3,
                "doctorId": 99,
                "firstName": "Ana",
                "lastName": "Reyes",
                "specialization": "Oncología",
                "licenseNumber": "MED-0001",
                "email": "ana@example.com",
                "available": false
            }
        });
        let identity = normalize(&payload).expect("should normalize");
        assert_eq!(identity.role(), Role::Doctor);
    }

    #[test]
    fn explicit_role_discriminator_wins() {
        let mut payload = doctor_payload();
        payload["role"] = json!("doctor");
        assert_eq!(
            normalize(&payload).expect("should normalize").role(),
            Role::Doctor
        );
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let payload = json!({ "message": "ok", "token": "tok" });
        let err = normalize(&payload).unwrap_err();
        assert!(matches!(err, AuthError::UnrecognizedIdentityShape));
    }

    #[test]
    fn matched_shape_with_missing_fields_is_rejected() {
        // Looks like a doctor but the profile is incomplete.
        let payload = json!({
            "token": "tok",
            "profile": { "specialization": "Oncología" }
        });
        let err = normalize(&payload).unwrap_err();
        assert!(matches!(err, AuthError::UnrecognizedIdentityShape));
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut payload = doctor_payload();
        payload["token"] = json!("");
        let err = normalize(&payload).unwrap_err();
        assert!(matches!(err, AuthError::UnrecognizedIdentityShape));
    }

    #[test]
    fn normalized_identities_carry_no_cross_role_fields() {
        let json = serde_json::to_value(normalize(&doctor_payload()).expect("normalize"))
            .expect("serialize");
        assert_eq!(json["role"], "doctor");
        assert!(json.get("doctorQuota").is_none());
        assert!(json.get("doctor_quota").is_none());
    }
}
