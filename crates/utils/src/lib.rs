use rand::Rng;

const SHAREABLE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the token a patient hands out to companions for pairing
pub const SHAREABLE_ID_LEN: usize = 6;

fn random_from_charset(charset: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

/// Short uppercase alphanumeric token used to find a user account when
/// pairing a companion with a patient.
pub fn create_shareable_id() -> String {
    random_from_charset(SHAREABLE_CHARSET, SHAREABLE_ID_LEN)
}

/// Identifier for records created by stores that do not assign their own
pub fn create_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
