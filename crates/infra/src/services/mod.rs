pub mod appwrite;
pub mod firestore;
pub mod notifications;
