use std::time::{SystemTime, UNIX_EPOCH};
use libc;
use std::fs::OpenOptions;
use std::io::{self, BufReader, Read, stdin};
use std::path::Path;
use flate2::read::GzDecoder;


#[path = "utils_test.rs"] mod utils_test;

pub fn realtime() -> f64 {
    let now = SystemTime::now();
    let since_epoch = now.duration_since(UNIX_EPOCH).expect("Time went backwards");
    since_epoch.as_secs_f64()
}

pub fn cputime() -> f64 {
    let rusage = unsafe {
        let mut rusage = std::mem::MaybeUninit::uninit();
        libc::getrusage(libc::RUSAGE_SELF, rusage.as_mut_ptr());
        rusage.assume_init()
    };
    let user_time = rusage.ru_utime;
    let sys_time = rusage.ru_stime;
    (user_time.tv_sec as f64 + user_time.tv_usec as f64 * 1e-6) +
    (sys_time.tv_sec as f64 + sys_time.tv_usec as f64 * 1e-6)
}

pub fn xopen<'a>(path: &'a Path) -> Result<Box<dyn Read + 'a>, io::Error> {
    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::new(stdin())));
    }

    let file = OpenOptions::new().read(true).open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

pub fn xzopen<'a>(path: &'a Path) -> Result<Box<dyn Read + 'a>, io::Error> {
    let input = xopen(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(input)))
    } else {
        Ok(input)
    }
}
