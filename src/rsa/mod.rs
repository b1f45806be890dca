use std::error::Error;
use std::io::{self, Write};
use std::thread;
use chrono::Local;
use clap::Parser;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use num_traits::One;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod config;
pub mod error;
pub mod keys;
pub mod modular;
pub mod prime_gen;
pub mod signature;

use config::*;
use error::*;
use keys::*;

#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Demo,
    Generate,
    Sign,
    Verify,
    Check,
    Test,
}

#[macro_export]
macro_rules! rsa_t {
    ($CONFIG: expr, $NAME: ident) => {
#[derive(Debug, Parser)]
pub struct $NAME {
    #[clap(short, long, value_parser, default_value = $CONFIG.mode.as_str(), help = "Run mode")]
    pub mode: String,
    #[clap(long, value_parser, allow_negative_numbers = true, default_value_t = $CONFIG.message, help = "Message to sign / check")]
    pub message: i64,
    #[clap(long, value_parser, allow_negative_numbers = true, default_value_t = $CONFIG.signature, help = "Signature to verify / check")]
    pub signature: i64,
    #[clap(short, long, value_parser, default_value_t = $CONFIG.exponent, help = "Key exponent for sign / verify / check")]
    pub exponent: i64,
    #[clap(short = 'n', long, value_parser, default_value_t = $CONFIG.modulus, help = "Key modulus for sign / verify / check")]
    pub modulus: i64,
    #[clap(long, value_parser, default_value_t = $CONFIG.prime_limit, help = "Sieve bound, primes are drawn from [2, PRIME_LIMIT]")]
    pub prime_limit: usize,
    #[clap(long, value_parser, default_value_t = $CONFIG.exponent_min, help = "Min private exponent")]
    pub exponent_min: i64,
    #[clap(long, value_parser, default_value_t = $CONFIG.exponent_max, help = "Max private exponent")]
    pub exponent_max: i64,
    #[clap(long, value_parser, default_value_t = $CONFIG.attempts, help = "Max draws for every rejection loop")]
    pub attempts: usize,
    #[clap(long, value_parser, default_value_t = $CONFIG.seed, help = "Random seed, 0 seeds from the clock")]
    pub seed: u64,
    #[clap(long, value_parser, default_value_t = $CONFIG.strict, help = "Reject messages and signatures outside [0, modulus)")]
    pub strict: bool,
    #[clap(short, long, value_parser, default_value_t = $CONFIG.rounds, help = "Key pairs to exercise in test mode")]
    pub rounds: usize,
    #[clap(short, long, value_parser, default_value_t = $CONFIG.silent, help = "Disable log output")]
    pub silent: bool,
    #[clap(short, long, value_parser, default_value_t = $CONFIG.threads, help = "Calculate in <THREADS> threads")]
    pub threads: usize,
}
    };
}

rsa_t!(CONFIG_DEF, RSA);

impl RSA {
    pub fn copy(&self) -> RSA {
        RSA {
            mode: self.mode.clone(),
            message: self.message,
            signature: self.signature,
            exponent: self.exponent,
            modulus: self.modulus,
            prime_limit: self.prime_limit,
            exponent_min: self.exponent_min,
            exponent_max: self.exponent_max,
            attempts: self.attempts,
            seed: self.seed,
            strict: self.strict,
            rounds: self.rounds,
            silent: self.silent,
            threads: self.threads,
        }
    }

    pub fn run_mode(&self) -> Result<RunMode, RsaError> {
        match self.mode.as_str() {
            "demo" => Ok(RunMode::Demo),
            "generate" => Ok(RunMode::Generate),
            "sign" => Ok(RunMode::Sign),
            "verify" => Ok(RunMode::Verify),
            "check" => Ok(RunMode::Check),
            "test" => Ok(RunMode::Test),
            _ => Err(RsaError::InvalidConfig(
                "Unknown run mode! available: demo(default), generate, sign, verify, check, test".to_string())),
        }
    }

    pub fn check_config(&self) -> Result<(), RsaError> {
        if self.prime_limit < 2 {
            return Err(RsaError::InvalidConfig(format!("prime limit {} has no primes", self.prime_limit)));
        }
        if self.prime_limit > PRIME_LIMIT_MAX {
            return Err(RsaError::InvalidConfig(format!(
                "prime limit {} above {}", self.prime_limit, PRIME_LIMIT_MAX)));
        }
        if self.exponent_min < 2 || self.exponent_min > self.exponent_max {
            return Err(RsaError::InvalidConfig(format!(
                "bad private exponent range [{}, {}]", self.exponent_min, self.exponent_max)));
        }
        if self.attempts == 0 {
            return Err(RsaError::InvalidConfig("attempts must be positive".to_string()));
        }
        if self.threads == 0 {
            return Err(RsaError::InvalidConfig("threads must be positive".to_string()));
        }
        Ok(())
    }

    pub fn seed_value(&self) -> u64 {
        match self.seed {
            0 => Local::now().timestamp_millis() as u64,
            s => s,
        }
    }

    /// Draws two distinct primes and builds a key pair from them.
    pub fn generate_key<R: Rng>(&self, rng: &mut R) -> Result<KeyPair, RsaError> {
        let start = Local::now().timestamp_millis();
        let p = self.generate_random_prime(rng)?;
        let mut q = self.generate_random_prime(rng)?;
        let mut redraws = 0;
        while q == p {
            if redraws >= self.attempts {
                return Err(RsaError::NoCandidateFound("distinct prime", self.attempts));
            }
            redraws += 1;
            q = self.generate_random_prime(rng)?;
        }
        let key_pair = self.generate_key_from_primes(p, q, rng)?;
        if !self.silent {
            let time = Local::now().timestamp_millis() - start;
            eprintln!("Done key generation with p = {}, q = {} ({} redraws) after {} ms", p, q, redraws, time);
        }
        Ok(key_pair)
    }

    /// Key pair for fixed primes; only the private exponent is random.
    pub fn generate_key_from_primes<R: Rng>(&self, p: i64, q: i64, rng: &mut R) -> Result<KeyPair, RsaError> {
        let f = RSA::euler(p, q)?;
        let mut tries = 0;
        let d = loop {
            if tries >= self.attempts {
                return Err(RsaError::NoCandidateFound("private exponent", self.attempts));
            }
            tries += 1;
            let d = rng.gen_range(self.exponent_min..=self.exponent_max);
            if RSA::gcd(d, f).is_one() { break d; }
        };
        if !self.silent { eprintln!("Done private exponent search in {} tries", tries); }
        RSA::key_from_parts(p, q, d)
    }

    pub fn key_from_parts(p: i64, q: i64, d: i64) -> Result<KeyPair, RsaError> {
        for x in [p, q] {
            if !RSA::is_prime(x) {
                return Err(RsaError::InvalidConfig(format!("{} is not prime", x)));
            }
        }
        if p == q { return Err(RsaError::EqualPrimes(p)); }
        let n = p.checked_mul(q).ok_or(RsaError::Overflow)?;
        let f = RSA::euler(p, q)?;
        let e = RSA::mod_inverse(d, f)?;
        RSA::check_key_set(d, e, f)?;
        Ok(KeyPair::new(
            PublicKey { exponent: e, modulus: n },
            PrivateKey { exponent: d, modulus: n },
        ))
    }

    /// `d * e == 1 (mod f)`
    pub fn check_key_set(d: i64, e: i64, f: i64) -> Result<(), RsaError> {
        if f < 1 { return Err(RsaError::InvalidModulus(f)); }
        let f128 = f as i128;
        if (d as i128 * e as i128).rem_euclid(f128) != 1 % f128 {
            return Err(RsaError::NoInverseExists(d, f));
        }
        Ok(())
    }

    /// One generate, sign, check cycle on a random in-range message, plus the
    /// key invariant recovered by factoring the modulus.
    pub fn round_trip<R: Rng>(&self, rng: &mut R) -> Result<bool, RsaError> {
        let key_pair = self.generate_key(rng)?;
        let message = rng.gen_range(0..key_pair.modulus());
        let signature = self.sign(message, key_pair.private())?;
        let recovered = self.check_signature(signature, message, key_pair.public())?;
        let invariant = match RSA::factor(key_pair.modulus()) {
            Some((p, q)) => RSA::check_key_set(
                key_pair.private().exponent, key_pair.public().exponent, RSA::euler(p, q)?).is_ok(),
            None => false,
        };
        if !(recovered && invariant) && !is_silent() {
            eprintln!("Round trip failed for message {} with\n{}", message, key_pair);
        }
        Ok(recovered && invariant)
    }

    fn run_test(&self, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
        let res_collect = self.run_jobs(rng, |worker, seed| {
            worker.round_trip(&mut StdRng::seed_from_u64(seed))
        })?;
        let mut failed = 0;
        for res in res_collect.into_iter() {
            if !res? { failed += 1; }
        }
        if failed != 0 {
            return Err(format!("{} of {} key pairs failed the round trip", failed, self.rounds).into());
        }
        if !self.silent { eprintln!("Test pass: {} key pairs", self.rounds); }
        Ok(())
    }

    /// Runs `job` once per round on `threads` workers, each round with its own
    /// seed drawn from `rng`. Results come back in round order.
    pub fn run_jobs<F>(&self, rng: &mut StdRng, job: F) -> Result<Vec<Result<bool, RsaError>>, Box<dyn Error>>
        where F: Fn(&RSA, u64) -> Result<bool, RsaError> + Send + Copy + 'static {
        let threads = self.threads;
        let (map_tx, map_rx): (Sender<(usize, u64)>, Receiver<(usize, u64)>) = bounded(threads);
        let (reduce_tx, reduce_rx): (Sender<(usize, Result<bool, RsaError>)>, Receiver<_>) = unbounded();
        let pb = match self.silent {
            true => None,
            false => Some(ProgressBar::new(self.rounds as u64)),
        };
        if let Some(pb) = &pb {
            pb.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("#>-"));
        }
        let handles = (0..threads).map(|_i| {
            let r = map_rx.clone();
            let s = reduce_tx.clone();
            let mut worker = self.copy();
            worker.silent = true;
            thread::spawn(move || {
                while let Ok((index, seed)) = r.recv() {
                    if s.send((index, job(&worker, seed))).is_err() { break; }
                }
            })
        }).collect::<Vec<_>>();
        // only workers hold receivers, so sending fails once they are all gone
        drop(map_rx);
        drop(reduce_tx);
        let mut res_collect = Vec::new();
        let mut workers_gone = false;
        for i in 0..self.rounds {
            while let Ok(r) = reduce_rx.try_recv() {
                res_collect.push(r);
                if let Some(pb) = &pb { pb.inc(1); }
            }
            if map_tx.send((i, rng.gen::<u64>())).is_err() {
                workers_gone = true;
                break;
            }
        }
        drop(map_tx);
        for r in reduce_rx.iter() {
            res_collect.push(r);
            if let Some(pb) = &pb { pb.inc(1); }
        }
        let mut panicked = 0;
        for handle in handles {
            if handle.join().is_err() { panicked += 1; }
        }
        if panicked != 0 || workers_gone || res_collect.len() != self.rounds {
            if let Some(pb) = &pb { pb.abandon(); }
            return Err(format!("{} of {} test workers panicked, {} of {} rounds finished",
                               panicked, threads, res_collect.len(), self.rounds).into());
        }
        if let Some(pb) = &pb {
            pb.finish_with_message("Done");
        }
        res_collect.sort_by_key(|r| r.0);
        Ok(res_collect.into_iter().map(|r| r.1).collect())
    }

    /// Signs and recovers `self.message` with `key_pair`, writing the four
    /// result lines.
    pub fn write_demo(&self, key_pair: &KeyPair, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let message = self.message;
        writeln!(writer, "Message: {}", message)?;
        let signature = self.sign(message, key_pair.private())?;
        writeln!(writer, "Encrypted: {}", signature)?;
        let decrypted = self.recover_message(signature, key_pair.public())?;
        writeln!(writer, "Decrypted: {}", decrypted)?;
        if self.check_signature(signature, message, key_pair.public())? {
            writeln!(writer, "Signature is correct!")?;
        } else {
            writeln!(writer, "Signature isn't correct")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        self.check_config()?;
        let seed = self.seed_value();
        if !self.silent { eprintln!("Using seed {}", seed); }
        let mut rng = StdRng::seed_from_u64(seed);
        match self.run_mode()? {
            RunMode::Demo => {
                let key_pair = self.generate_key(&mut rng)?;
                if !self.silent { eprintln!("get key_pair:\n{}", key_pair); }
                self.write_demo(&key_pair, &mut io::stdout())?;
            }
            RunMode::Generate => {
                let key_pair = self.generate_key(&mut rng)?;
                println!("{}", key_pair);
            }
            RunMode::Sign => {
                let key = PrivateKey { exponent: self.exponent, modulus: self.modulus };
                println!("{}", self.sign(self.message, &key)?);
            }
            RunMode::Verify => {
                let key = PublicKey { exponent: self.exponent, modulus: self.modulus };
                println!("{}", self.verify_signature(self.signature, &key)?);
            }
            RunMode::Check => {
                let key = PublicKey { exponent: self.exponent, modulus: self.modulus };
                let ok = self.check_signature(self.signature, self.message, &key)?;
                println!("{}", ok);
                if !ok { return Err("Signature isn't correct".into()); }
            }
            RunMode::Test => self.run_test(&mut rng)?,
        }
        Ok(())
    }
}
