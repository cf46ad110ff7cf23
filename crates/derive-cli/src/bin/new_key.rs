/*
[INPUT]:  None
[OUTPUT]: Fresh session key address and private key on stdout
[POS]:    Binary entry point - key generation
[UPDATE]: When key output format changes
*/

use derive_client::generate_key_pair;

fn main() {
    let pair = generate_key_pair();
    println!("Address: {}", pair.address);
    println!("Private Key: {}", pair.private_key);
}
