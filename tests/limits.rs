use passphrase2pgp::packet::{self, SigningKey, UserId, MAX_BODY_LEN};
use passphrase2pgp::types::{Bindable, Tag, Timestamp};
use passphrase2pgp::{Certificate, ErrorKind};
use pretty_assertions::assert_eq;

fn user_id(len: usize) -> UserId {
    UserId::new(vec![b'u'; len])
}

#[test]
fn user_id_length_boundary() {
    let _ = pretty_env_logger::try_init();

    let packet = user_id(MAX_BODY_LEN).packet().unwrap();
    assert_eq!(packet.len(), 2 + 255);
    assert_eq!(&packet[..2], &[0xcd, 0xff]);

    let err = user_id(MAX_BODY_LEN + 1).packet().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn oversized_user_id_fails_the_whole_stream() {
    let _ = pretty_env_logger::try_init();

    let key = SigningKey::from_seed(&[1u8; 32], Timestamp::from_secs(0)).unwrap();
    let cert = Certificate::new(key, user_id(300), None);
    assert_eq!(cert.secret_bytes().unwrap_err().kind(), ErrorKind::Encoding);
    assert_eq!(cert.public_bytes().unwrap_err().kind(), ErrorKind::Encoding);

    // signing does not involve the user id
    assert!(cert.sign(&b"data"[..]).is_ok());
}

#[test]
fn framing_boundary() {
    let _ = pretty_env_logger::try_init();

    let body = vec![0u8; 255];
    let framed = packet::encode(Tag::UserId, &body).unwrap();
    let (tag, decoded) = packet::decode(&framed[..]).unwrap();
    assert_eq!(tag, Tag::UserId);
    assert_eq!(decoded.len(), 255);

    let err = packet::encode(Tag::UserId, &[0u8; 256]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}
