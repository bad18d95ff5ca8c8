pub fn main() {
    let input = br#"Date: 7 Mar 2023 08:00:00 +0200
From: =?ISO-8859-1?Q?Andr=E9?= Pirard <deuxfleurs@example.com>
To: someone_else@example.com
Subject: =?UTF-8?B?QW4gUkZDIDgyMg==?= =?UTF-8?Q?_formatted_message?=
MIME-Version: 1.0
Content-Type: text/plain;
 charset=us-ascii

This is the plain text body of the message. Note the blank line
between the header information and the body of the message."#;

    // the reader stops right after the blank line
    let mut reader = &input[..];
    let mut diags: Vec<eml_header::Diagnostic> = vec![];
    let headers = eml_header::header::read_header(&mut reader, &mut diags).unwrap();

    let decoder = eml_header::HeaderDecoder::default();
    println!(
        "{} just sent you an email with subject \"{}\"",
        headers.get_decoded("from", &decoder, &mut diags).unwrap(),
        headers.get_decoded("subject", &decoder, &mut diags).unwrap(),
    );

    // canonical form, ready for an address parser
    println!(
        "From: {}",
        headers.get_canonical("from", &decoder, &mut diags).unwrap(),
    );

    for (name, values) in headers.iter() {
        println!("{}: {:?}", name, values);
    }
    for diag in &diags {
        println!("{}", diag);
    }
    println!("\nbody:\n{}", String::from_utf8_lossy(reader));
}
